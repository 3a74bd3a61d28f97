// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! End-to-end exercise of the search substrate: a miniature exhaustive
//! branch-and-bound driver built from the public pieces, verifying that
//! a full descend/backtrack sweep leaves the root state untouched and
//! finds the known optimum.

use hawser_bnb::solution::Solution;
use hawser_bnb::stack::SearchStack;
use hawser_bnb::state::SearchState;
use hawser_bnb::timeline::BerthTimeline;
use hawser_bnb::trail::{DeltaTrail, FrameTrail};
use hawser_core::math::window::TimeWindow;

type Time = i64;
type Index = i32;
type Cost = f64;
type State = SearchState<Time, Index, Cost>;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Move {
    vessel: Index,
    berth: Index,
    start: Time,
    finish: Time,
    cost_delta: Cost,
}

/// Everything one applied move must revert.
#[derive(Clone, Copy, Debug)]
struct MoveUndo {
    vessel: Index,
    berth: Index,
    old_berth_free_time: Time,
    old_objective: Cost,
    old_last_vessel: Index,
}

struct Instance {
    ready_times: Vec<Time>,
    durations: Vec<Time>,
    timelines: Vec<BerthTimeline<Time>>,
}

struct Driver {
    state: State,
    stack: SearchStack<Move>,
    trail: FrameTrail<MoveUndo>,
    best: Option<Cost>,
    nodes: usize,
}

impl Driver {
    fn new(instance: &Instance) -> Self {
        let num_berths = instance.timelines.len();
        let num_vessels = instance.ready_times.len();
        Self {
            state: State::new(num_berths, num_vessels),
            stack: SearchStack::preallocated(num_berths, num_vessels),
            trail: FrameTrail::preallocated(num_vessels, num_vessels + 1),
            best: None,
            nodes: 0,
        }
    }

    /// Streams one candidate move per feasible berth for `vessel` into a
    /// fresh frame on the stack.
    fn generate_moves(&mut self, instance: &Instance, vessel: Index) {
        let ready = instance.ready_times[vessel as usize];
        let duration = instance.durations[vessel as usize];

        let state = &self.state;
        let stack = &mut self.stack;
        stack.fill_frame_with_hint(instance.timelines.len(), |s| {
            for (berth, timeline) in instance.timelines.iter().enumerate() {
                let berth = berth as Index;
                let earliest = if state.berth_free_time(berth) > ready {
                    state.berth_free_time(berth)
                } else {
                    ready
                };
                if let Some(start) = timeline.find_earliest_start(earliest, duration) {
                    let finish = start + duration;
                    s.push(Move {
                        vessel,
                        berth,
                        start,
                        finish,
                        cost_delta: (finish - ready) as Cost,
                    });
                }
            }
        });
    }

    fn search(&mut self, instance: &Instance, depth: usize) {
        self.nodes += 1;

        if depth == instance.ready_times.len() {
            let objective = self.state.current_objective();
            if self.best.map_or(true, |best| objective < best) {
                self.best = Some(objective);
            }
            return;
        }

        let vessel = depth as Index;
        self.generate_moves(instance, vessel);

        // Siblings stay visible as one slice for the whole node.
        let candidates: Vec<Move> = self.stack.current_frame_entries().to_vec();

        for candidate in candidates {
            self.trail.push_frame();
            self.trail.push(MoveUndo {
                vessel: candidate.vessel,
                berth: candidate.berth,
                old_berth_free_time: self.state.berth_free_time(candidate.berth),
                old_objective: self.state.current_objective(),
                old_last_vessel: self.state.last_assigned_vessel(),
            });
            self.state.apply_move(
                candidate.vessel,
                candidate.berth,
                candidate.start,
                candidate.finish,
                candidate.cost_delta,
            );

            self.search(instance, depth + 1);

            let state = &mut self.state;
            self.trail.backtrack(|undo| {
                state.backtrack_move(
                    undo.vessel,
                    undo.berth,
                    undo.old_berth_free_time,
                    undo.old_objective,
                    undo.old_last_vessel,
                );
            });
        }

        self.stack.pop_frame();
    }
}

fn small_instance() -> Instance {
    // Berth 0 is open on [0, 100) with a fixed assignment on [20, 30);
    // berth 1 is open on [0, 50).
    let availability_0 = [TimeWindow::new(0, 100)];
    let fixed_0 = [TimeWindow::new(20, 30)];

    Instance {
        ready_times: vec![0, 5, 10],
        durations: vec![10, 10, 10],
        timelines: vec![
            BerthTimeline::carved(&availability_0, &fixed_0),
            BerthTimeline::from_range(0, 50),
        ],
    }
}

#[test]
fn test_exhaustive_search_finds_optimum_and_restores_root() {
    let instance = small_instance();
    let mut driver = Driver::new(&instance);

    driver.search(&instance, 0);

    // Every vessel has flow time >= its duration (10), and the schedule
    // v0->b0@0, v1->b1@5, v2->b0@10 achieves exactly that bound.
    assert_eq!(driver.best, Some(30.0));
    assert!(driver.nodes > 3);

    // The sweep must leave the root state untouched.
    assert_eq!(driver.state.num_assigned_vessels(), 0);
    assert_eq!(driver.state.current_objective(), 0.0);
    assert_eq!(driver.state.last_assigned_vessel(), State::UNASSIGNED);
    assert!(driver.state.berth_free_times().iter().all(|&t| t == 0));

    // And both tapes fully unwound.
    assert!(driver.stack.is_empty());
    assert_eq!(driver.stack.num_entries(), 0);
    assert!(driver.trail.is_empty());
    assert_eq!(driver.trail.num_entries(), 0);
}

#[test]
fn test_greedy_descent_extracts_solution() {
    let instance = small_instance();
    let mut driver = Driver::new(&instance);

    // Walk one greedy path: always take the last candidate of the frame.
    for depth in 0..instance.ready_times.len() {
        driver.generate_moves(&instance, depth as Index);
        let candidate = *driver.stack.top().expect("a feasible move must exist");
        driver.state.apply_move(
            candidate.vessel,
            candidate.berth,
            candidate.start,
            candidate.finish,
            candidate.cost_delta,
        );
    }

    let solution = Solution::try_from(&driver.state).expect("all vessels assigned");
    assert_eq!(solution.num_vessels(), 3);
    assert!(solution.objective_value() >= 30.0);

    // The global tape shows the whole root-to-leaf history.
    assert_eq!(driver.stack.depth(), 3);
    let visited_vessels: Vec<Index> = driver.stack.iter().map(|m| m.vessel).collect();
    assert!(visited_vessels.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_delta_trail_drives_sparse_rollback() {
    // The delta-variant driver pattern: berth free times restored by
    // value, assignment slots reset to the unassigned default.
    const UNASSIGNED: i64 = -1;

    let mut berth_free_times = vec![0i64; 4];
    let mut assignments = vec![UNASSIGNED; 6];
    let mut trail: DeltaTrail<i64> = DeltaTrail::preallocated(32);

    // Node A: vessel 0 -> berth 2 until 40.
    trail.push_checkpoint();
    trail.save_value(2, berth_free_times[2]);
    berth_free_times[2] = 40;
    trail.mark_touched(0);
    assignments[0] = 2;

    // Node B below A: vessel 3 -> berth 2 until 90.
    trail.push_checkpoint();
    trail.save_value(2, berth_free_times[2]);
    berth_free_times[2] = 90;
    trail.mark_touched(3);
    assignments[3] = 2;

    assert_eq!(berth_free_times[2], 90);
    assert_eq!(trail.depth(), 2);

    // Unwind B: vessel 3 is reset, the berth returns to 40.
    trail.backtrack_with_reset(&mut berth_free_times, &mut assignments, UNASSIGNED);
    assert_eq!(berth_free_times[2], 40);
    assert_eq!(assignments[3], UNASSIGNED);
    assert_eq!(assignments[0], 2);

    // Unwind A: the root is restored.
    trail.backtrack_with_reset(&mut berth_free_times, &mut assignments, UNASSIGNED);
    assert_eq!(berth_free_times, vec![0, 0, 0, 0]);
    assert!(assignments.iter().all(|&a| a == UNASSIGNED));
    assert!(trail.is_empty());
}
