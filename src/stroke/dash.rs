// Copyright 2024 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Dash pattern application.
//!
//! The dasher walks each stroke subpath, splitting its segments at dash
//! boundaries. Every "on" run becomes a new open subpath; fragments
//! recompute their frame, while segment boundaries inside a run keep the
//! original corners, so joins still apply there.

use alloc::vec::Vec;

use scanfill_path::FiniteF32;

use crate::stroke::{SegmentStore, StrokeDot, StrokeSegment, StrokeSubpath};

/// A stroke dashing properties.
///
/// Contains an array of interval lengths. Even indices are "on"
/// (drawing) intervals, odd indices are "off" gaps. An odd-length array
/// behaves as if it were concatenated with itself, which flips on and off
/// on every repetition, matching the PostScript semantics.
///
/// # Guarantees
///
/// - The dash array is not empty.
/// - All dash array values are finite and >= 0.
/// - At least one dash array value is positive.
/// - Dash offset is finite.
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeDash {
    array: Vec<f32>,
    offset: f32,
}

impl StrokeDash {
    /// Creates a new stroke dashing object.
    pub fn new(dash_array: Vec<f32>, dash_offset: f32) -> Option<Self> {
        let dash_offset = FiniteF32::new(dash_offset)?;

        if dash_array.is_empty() {
            return None;
        }

        if dash_array.iter().any(|n| !n.is_finite() || *n < 0.0) {
            return None;
        }

        if !dash_array.iter().any(|n| *n > 0.0) {
            return None;
        }

        Some(StrokeDash {
            array: dash_array,
            offset: dash_offset.get(),
        })
    }

    /// The number of intervals after the odd-length doubling.
    fn interval_count(&self) -> usize {
        if self.array.len() % 2 == 0 {
            self.array.len()
        } else {
            self.array.len() * 2
        }
    }

    fn interval(&self, index: usize) -> f32 {
        self.array[index % self.array.len()]
    }

    fn total_length(&self) -> f32 {
        let sum: f32 = self.array.iter().sum();
        if self.array.len() % 2 == 0 {
            sum
        } else {
            sum * 2.0
        }
    }

    /// Consumes the phase and returns the starting interval index and the
    /// length remaining in it.
    fn first_interval(&self) -> (usize, f32) {
        let mut offset = adjust_dash_offset(self.offset, self.total_length());
        for index in 0..self.interval_count() {
            let gap = self.interval(index);
            if offset > gap || (offset == gap && gap != 0.0) {
                offset -= gap;
            } else {
                return (index, gap - offset);
            }
        }

        // The phase "appears" to be larger than the pattern length due to
        // accumulated rounding. Eat the error and start at the beginning.
        (0, self.interval(0))
    }
}

// Adjust phase to be between 0 and len, "flipping" phase if negative.
// e.g., if len is 100, then phase of -20 (or -120) is equivalent to 80.
fn adjust_dash_offset(mut offset: f32, len: f32) -> f32 {
    if offset < 0.0 {
        offset = -offset;
        if offset > len {
            offset %= len;
        }

        offset = len - offset;

        // Due to finite precision, it's possible that phase == len,
        // even after the subtract (if len >>> phase), so fix that here.
        debug_assert!(offset <= len);
        if offset == len {
            offset = 0.0;
        }

        offset
    } else if offset >= len {
        offset % len
    } else {
        offset
    }
}

/// Applies the dash pattern to every subpath of `input`, writing runs
/// into `output`. Bare points pass through: they have no length to dash.
pub(crate) fn apply(input: &SegmentStore, dash: &StrokeDash, output: &mut SegmentStore) {
    output.clear();
    output.dots.extend_from_slice(&input.dots);

    for subpath in &input.subpaths {
        dash_subpath(
            input.subpath_segments(subpath),
            subpath.closed,
            dash,
            output,
        );
    }
}

fn dash_subpath(
    segments: &[StrokeSegment],
    closed: bool,
    dash: &StrokeDash,
    output: &mut SegmentStore,
) {
    if segments.is_empty() {
        return;
    }

    let interval_count = dash.interval_count();
    let (mut index, first_left) = dash.first_interval();
    // Double precision keeps the walk stable for extreme
    // path-length/dash-length ratios.
    let mut left = f64::from(first_left);

    let started_on = index % 2 == 0;
    let first_run = output.subpaths.len();
    let mut run_start: Option<usize> = None;

    for segment in segments {
        let length = f64::from(segment.length());
        let mut pos = 0.0;
        while pos < length {
            if left <= 0.0 {
                // Interval exhausted: emit and switch.
                if index % 2 == 0 {
                    close_run(&mut run_start, output, || StrokeDot {
                        pos: segment.point_at(pos as f32),
                        tangent: Some(segment.t),
                    });
                }
                index = (index + 1) % interval_count;
                left = f64::from(dash.interval(index));
                continue;
            }

            let take = left.min(length - pos);
            if index % 2 == 0 {
                if run_start.is_none() {
                    run_start = Some(output.segments.len());
                }

                let a = segment.point_at(pos as f32);
                let b = segment.point_at((pos + take) as f32);
                if let Some(fragment) = StrokeSegment::new(a, b) {
                    output.segments.push(fragment);
                }
            }

            pos += take;
            left -= take;
        }
    }

    let ended_on = index % 2 == 0;
    if let Some(start) = run_start.take() {
        output.subpaths.push(StrokeSubpath {
            start,
            end: output.segments.len(),
            closed: false,
        });
    }

    if closed && started_on && ended_on {
        join_wrapped_runs(output, first_run);
    }
}

fn close_run(
    run_start: &mut Option<usize>,
    output: &mut SegmentStore,
    make_dot: impl FnOnce() -> StrokeDot,
) {
    match run_start.take() {
        Some(start) => {
            if output.segments.len() > start {
                output.subpaths.push(StrokeSubpath {
                    start,
                    end: output.segments.len(),
                    closed: false,
                });
                return;
            }
            // All fragments degenerated, fall through to the dot case.
            output.dots.push(make_dot());
        }
        None => {
            // A zero-length "on" interval draws a dot, so patterns like
            // [0, 5] produce a dotted line.
            output.dots.push(make_dot());
        }
    }
}

// A dash crossing a closed contour's seam must render as one joined run,
// not as two butt-capped fragments. This is fixed up after the walk: the
// last run absorbs the first one.
fn join_wrapped_runs(output: &mut SegmentStore, first_run: usize) {
    let run_count = output.subpaths.len() - first_run;
    if run_count == 0 {
        return;
    }

    if run_count == 1 {
        // A single run that starts and ends "on" covers the entire
        // contour; render it closed so the seam gets a join.
        output.subpaths[first_run].closed = true;
        return;
    }

    let first = output.subpaths[first_run];
    for i in first.start..first.end {
        let segment = output.segments[i];
        output.segments.push(segment);
    }

    let last = output.subpaths.last_mut().unwrap();
    last.end = output.segments.len();
    output.subpaths.remove(first_run);
}
