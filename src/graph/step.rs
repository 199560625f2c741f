use super::gate::*;
use super::GateNetwork;
use crate::data_structures::OutputState;
use indexmap::IndexSet;
use smallvec::SmallVec;
use unwrap::unwrap;

/// Default number of ticks that methods ending with `_stable` will execute,
/// before panicking.
pub const DEFAULT_STABLE_MAX: usize = 50;

/// Evaluates every gate against `state` and returns the outputs positionally.
///
/// Inputs are read from `state` only, so no gate can observe another gate's output from the same step.
fn next_outputs(
    gates: &mut [Gate],
    inputs: &[IndexSet<GateIndex>],
    state: &OutputState,
) -> OutputState {
    gates
        .iter_mut()
        .zip(inputs)
        .map(|(gate, wires)| {
            // Sources ignore their wiring, VOID only marks them as unconnected.
            if gate.kind().is_source() {
                return gate.evaluate(&[]);
            }
            let values: SmallVec<[bool; GATE_INPUTS_TINYVEC_SIZE]> =
                wires.iter().map(|wire| state.get_state(wire.idx)).collect();
            gate.evaluate(&values)
        })
        .collect()
}

impl GateNetwork {
    /// Returns the outputs every gate would have after one step, computed from the committed outputs.
    ///
    /// Nothing is committed, call [GateNetwork::update_outputs] to do so.
    /// Calling it again without committing returns the same state.
    /// Leds record the value they read as a side effect.
    ///
    /// # Example
    /// ```
    /// # use logicstep::GateNetwork;
    /// let mut g = GateNetwork::new();
    /// let switch = g.switch("switch");
    /// let not = g.not1(switch, "not");
    ///
    /// let next = g.compute_next_outputs();
    /// assert_eq!(next.get_state(not.index()), true);
    /// assert_eq!(g.output_of(not), false);
    ///
    /// g.update_outputs(next);
    /// assert_eq!(g.output_of(not), true);
    /// ```
    pub fn compute_next_outputs(&mut self) -> OutputState {
        next_outputs(&mut self.gates, &self.inputs, &self.state)
    }

    /// Same as [GateNetwork::compute_next_outputs] but reads the inputs from `state`
    /// instead of the committed outputs.
    ///
    /// # Panics
    ///
    /// Will panic if `state` doesn't have an output for every gate.
    pub fn compute_next_outputs_from(&mut self, state: &OutputState) -> OutputState {
        assert_eq!(
            state.len(),
            self.gates.len(),
            "Tried to evaluate a network of {} gates from a state of {} gates",
            self.gates.len(),
            state.len()
        );
        next_outputs(&mut self.gates, &self.inputs, state)
    }

    /// Commits `new_state`, replacing the outputs of every gate.
    ///
    /// # Panics
    ///
    /// Will panic if `new_state` doesn't have an output for every gate.
    #[allow(unused_variables)]
    pub fn update_outputs(&mut self, new_state: OutputState) {
        assert_eq!(
            new_state.len(),
            self.gates.len(),
            "Tried to commit a state of {} gates to a network of {} gates",
            new_state.len(),
            self.gates.len()
        );
        let old_state = std::mem::replace(&mut self.state, new_state);
        #[cfg(feature = "debug_gates")]
        self.print_probes(&old_state);
    }

    /// Prints every probe containing a gate whose output differs from `old_state`.
    #[cfg(feature = "debug_gates")]
    fn print_probes(&self, old_state: &OutputState) {
        if self.probes.is_empty() {
            return;
        }
        let mut printed = std::collections::HashSet::new();
        for i in 0..self.state.len() {
            if old_state.get_state(i) == self.state.get_state(i) {
                continue;
            }
            if let Some(probe) = self.probes.get(&gi!(i)) {
                if !printed.insert(probe.name.as_str()) {
                    continue;
                }
                match probe.bits.len() {
                    0 => unreachable!(),
                    1 => println!("{}:{}", probe.name, self.state.get_state(i)),
                    2..=8 => println!("{}:{}", probe.name, self.collect_u8_lossy(&probe.bits)),
                    9..=64 => println!("{}:{}", probe.name, self.collect_u64_lossy(&probe.bits)),
                    _ => {
                        let bits: Vec<_> = probe.bits.iter().map(|b| self.output_of(*b)).collect();
                        println!("{}:{:?}", probe.name, bits)
                    }
                }
            }
        }
    }

    /// Computes and commits one step.
    /// Returns true if the step didn't change any output, meaning the network has reached a stable state.
    pub fn tick(&mut self) -> bool {
        let next = self.compute_next_outputs();
        let stable = next == self.state;
        self.update_outputs(next);
        stable
    }

    /// Calls [GateNetwork::tick] until it returns true a maximum of `max` times.
    /// Returns Ok(number_of_ticks_that_changed_outputs) if the network stabilized.
    /// Returns Err(&str) otherwise.
    ///
    /// Networks might not stabilize if they have loops like a chain of 3 not gates.
    pub fn run_until_stable(&mut self, max: usize) -> Result<usize, &'static str> {
        for i in 0..max {
            if self.tick() {
                return Ok(i);
            }
        }

        Err("Your network didn't stabilize")
    }

    /// Sets the value held by `switch` to `value` and calls [run_until_stable](GateNetwork::run_until_stable),
    /// with [DEFAULT_STABLE_MAX].
    ///
    /// # Panics
    ///
    /// Will panic if `switch` is not a switch or if the network does not stabilize.
    pub fn update_switch_stable(&mut self, switch: GateIndex, value: bool) {
        self.set_held_value(switch, value);
        unwrap!(
            self.run_until_stable(DEFAULT_STABLE_MAX),
            "Switch {} was set to {}",
            switch,
            value
        );
    }

    /// Sets `switch` to true and runs until the network is stable.
    ///
    /// # Panics
    ///
    /// Will panic if `switch` is not a switch or if the network does not stabilize.
    pub fn set_switch_stable(&mut self, switch: GateIndex) {
        self.update_switch_stable(switch, true)
    }

    /// Sets `switch` to false and runs until the network is stable.
    ///
    /// # Panics
    ///
    /// Will panic if `switch` is not a switch or if the network does not stabilize.
    pub fn reset_switch_stable(&mut self, switch: GateIndex) {
        self.update_switch_stable(switch, false)
    }

    /// Sets `switch` to true, runs until the network is stable,
    /// then sets `switch` to false and runs until the network is stable again.
    ///
    /// # Panics
    ///
    /// Will panic if `switch` is not a switch or if the network does not stabilize.
    pub fn pulse_switch_stable(&mut self, switch: GateIndex) {
        self.set_switch_stable(switch);
        self.reset_switch_stable(switch);
    }
}

/// Asserts that the network stabilizes after exactly `expected` ticks that changed outputs.
#[macro_export]
macro_rules! assert_propagation {
    ($g:expr, $expected:expr) => {
        let actual = $g
            .run_until_stable(1000)
            .expect("Network didn't stabilize after 1000 ticks");

        assert!(
            actual == $expected,
            "Network stabilized after {} ticks, expected: {}",
            actual,
            $expected
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    /// switch -> not1 -> not2 -> led
    fn switch_chain(g: &mut GateNetwork) -> (GateIndex, GateIndex, GateIndex, GateIndex) {
        let not1 = g.not("not1");
        let not2 = g.not("not2");
        let switch = g.switch("switch");
        let led = g.add_named_gate(Gate::new(GateKind::Led), "led");
        g.connect(switch, not1);
        g.connect(not1, not2);
        g.connect(not2, led);
        (switch, not1, not2, led)
    }

    #[test]
    fn test_switch_chain_from_power_on() {
        let mut g = GateNetwork::new();
        let (switch, not1, not2, led) = switch_chain(&mut g);
        g.set_held_value(switch, true);

        assert_eq!(g.outputs().to_vec(), vec![false; 5]);
        assert_eq!(g.is_on(led), false);

        // Every gate starts at false, so both nots light up on the first step
        // and the led shows that glitch before settling.
        let mut leds = Vec::new();
        let mut not2s = Vec::new();
        for _ in 0..5 {
            g.tick();
            leds.push(g.is_on(led));
            not2s.push(g.output_of(not2));
        }
        assert_eq!(leds, vec![false, true, false, true, true]);
        assert_eq!(not2s, vec![true, false, true, true, true]);
        assert_eq!(g.output_of(not1), false);
        assert_eq!(g.output_of(switch), true);
    }

    #[test]
    fn test_change_takes_one_step_per_wire() {
        let mut g = GateNetwork::new();
        let (switch, not1, not2, led) = switch_chain(&mut g);
        assert_propagation!(g, 2);
        assert_eq!(g.is_on(led), false);

        g.set_held_value(switch, true);

        // The switch publishes its value on the first step, then each wire takes one more.
        g.tick();
        assert_eq!(g.output_of(switch), true);
        assert_eq!(g.output_of(not1), true);
        g.tick();
        assert_eq!(g.output_of(not1), false);
        assert_eq!(g.output_of(not2), false);
        g.tick();
        assert_eq!(g.output_of(not2), true);
        assert_eq!(g.is_on(led), false);
        g.tick();
        assert_eq!(g.is_on(led), true);

        assert_propagation!(g, 0);
    }

    #[test]
    fn test_compute_next_outputs_is_idempotent() {
        let mut g = GateNetwork::new();
        let (switch, ..) = switch_chain(&mut g);
        g.set_held_value(switch, true);
        g.tick();

        let first = g.compute_next_outputs();
        let second = g.compute_next_outputs();
        assert_eq!(first, second);

        let committed = g.outputs().clone();
        assert_ne!(first, committed);
    }

    #[test]
    fn test_compute_next_outputs_from() {
        let mut g = GateNetwork::new();
        let a = g.switch("a");
        let b = g.switch("b");
        let nand = g.nand2(a, b, "nand");

        let all_on: OutputState = vec![Some(false), Some(true), Some(true), Some(true)]
            .into_iter()
            .collect();
        let next = g.compute_next_outputs_from(&all_on);

        assert_eq!(next.get_if_driven(nand.index()), Some(false));
        assert_eq!(g.output_of(nand), false);
        assert_eq!(g.compute_next_outputs().get_if_driven(nand.index()), Some(true));
    }

    #[test]
    fn test_void_output_is_false_and_driven() {
        let mut g = GateNetwork::new();
        g.tick();

        assert_eq!(g.outputs().get_if_driven(VOID.index()), Some(false));
    }

    #[test]
    fn test_wrong_input_count_is_no_output() {
        let mut g = GateNetwork::new();
        let a = g.switch("a");
        let and = g.and1(a, "and");
        g.set_held_value(a, true);

        g.tick();
        g.tick();

        assert_eq!(g.outputs().get_if_driven(and.index()), None);
        assert_eq!(g.output_of(and), false);
    }

    #[test]
    fn test_unconnected_gates_read_void() {
        let mut g = GateNetwork::new();
        let not = g.not("not");
        let led = g.led1(not, "led");

        assert_propagation!(g, 1);
        assert_eq!(g.output_of(not), true);
        assert_eq!(g.is_on(led), true);
    }

    #[test]
    fn test_gates_after_a_led_read_false() {
        let mut g = GateNetwork::new();
        let s = g.switch("s");
        g.set_held_value(s, true);
        let led1 = g.led1(s, "led1");
        let not = g.not1(led1, "not");
        let led2 = g.led1(not, "led2");

        g.run_until_stable(10).unwrap();

        assert_eq!(g.is_on(led1), true);
        assert_eq!(g.output_of(led1), false);
        assert_eq!(g.outputs().get_if_driven(led1.index()), None);
        assert_eq!(g.output_of(not), true);
        assert_eq!(g.is_on(led2), true);
    }

    #[test]
    fn test_switches_ignore_wiring() {
        let mut g = GateNetwork::new();
        let a = g.switch("a");
        let b = g.switch("b");
        g.connect(a, b);
        g.set_held_value(b, true);

        g.tick();
        assert_eq!(g.output_of(b), true);
    }

    #[test]
    fn test_not_loop() {
        let mut g = GateNetwork::new();
        let n1 = g.not("n1");
        let n2 = g.not1(n1, "n2");
        let n3 = g.not1(n2, "n3");
        g.connect(n3, n1);

        let mut a = false;
        for _ in 0..10 {
            assert_eq!(g.output_of(n1), a);
            g.tick();
            a = !a;
        }

        // There is no stable state
        assert!(g.run_until_stable(100).is_err())
    }

    #[test]
    fn test_self_loop() {
        let mut g = GateNetwork::new();
        let not = g.not("not");
        g.connect(not, not);

        g.tick();
        assert_eq!(g.output_of(not), true);
        g.tick();
        assert_eq!(g.output_of(not), false);
    }

    #[test]
    fn test_pulse_switch_stable() {
        let mut g = GateNetwork::new();
        let s = g.switch("s");
        let or = g.or("or");
        g.connect(s, or);
        g.connect(or, or);
        g.run_until_stable(10).unwrap();
        assert_eq!(g.output_of(or), false);

        // The or keeps itself on once it sees the pulse.
        g.pulse_switch_stable(s);
        assert_eq!(g.output_of(or), true);
        assert_eq!(g.held_value(s), false);
    }

    #[test]
    #[should_panic(expected = "Tried to commit a state of 1 gates to a network of 2 gates")]
    fn test_update_outputs_wrong_len_panics() {
        let mut g = GateNetwork::new();
        g.not("not");
        g.update_outputs(OutputState::new(1));
    }

    #[test]
    #[should_panic(expected = "Tried to evaluate a network of 1 gates from a state of 3 gates")]
    fn test_compute_next_outputs_from_wrong_len_panics() {
        let mut g = GateNetwork::new();
        g.compute_next_outputs_from(&OutputState::new(3));
    }

    #[test]
    #[cfg(feature = "debug_gates")]
    fn test_probes_dont_change_results() {
        let mut g = GateNetwork::new();
        let bits: Vec<_> = (0..3).map(|i| g.switch(format!("s{}", i))).collect();
        g.probe(&bits, "word");
        g.probe1(bits[0], "bit");
        g.set_held_value(bits[2], true);

        g.tick();
        assert_eq!(g.outputs().to_vec(), vec![false, false, false, true]);
    }
}
