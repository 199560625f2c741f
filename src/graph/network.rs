use super::gate::*;
use super::handles::*;
use crate::data_structures::OutputState;
use casey::pascal;
use concat_idents::concat_idents;
use indexmap::IndexSet;
#[cfg(feature = "debug_gates")]
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use unwrap::unwrap;

use GateKind::*;

/// Creates gatename, gatename1 and gatename2 constructors for every gate with two inputs.
/// The constructors create gates wired to VOID, to 1 gate and to 2 gates respectively.
macro_rules! gate_constructors {
    ($name:ident,$($rest:ident),*) => {
        gate_constructors!($name);
        gate_constructors!($($rest),*);
    };
    ($name:ident) => {
        /// Returns the [GateIndex] of a new gate wired to VOID. Inputs can be added with [GateNetwork::connect].
        ///
        /// Providing a good name allows for a great debugging experience, you can disable the "debug_gates" feature
        /// to slightly increase performance.
        pub fn $name<S: Into<String>>(&mut self, name: S) -> GateIndex {
            self.add_named_gate(Gate::new(pascal!($name)), name)
        }

        concat_idents!(name1 = $name, 1 {
            /// Returns the [GateIndex] of a new gate with 1 input.
            ///
            /// Providing a good name allows for a great debugging experience, you can disable the "debug_gates" feature
            /// to slightly increase performance.
            pub fn name1<S: Into<String>>(&mut self, dep: GateIndex, name: S) -> GateIndex {
                let idx = self.add_named_gate(Gate::new(pascal!($name)), name);
                self.connect(dep, idx);
                idx
            }
        });

        concat_idents!(name2 = $name, 2 {
            /// Returns the [GateIndex] of a new gate with 2 inputs, in order.
            ///
            /// Providing a good name allows for a great debugging experience, you can disable the "debug_gates" feature
            /// to slightly increase performance.
            pub fn name2<S: Into<String>>(&mut self, dep1: GateIndex, dep2: GateIndex, name: S) -> GateIndex {
                let idx = self.add_named_gate(Gate::new(pascal!($name)), name);
                self.connect(dep1, idx);
                self.connect(dep2, idx);
                idx
            }
        });
    };
}

/// Generates the collect_type_lossy functions for [GateNetwork].
macro_rules! type_collectors {
    ($ty:ident,$($rest:ident),*) => {
        type_collectors!($ty);
        type_collectors!($($rest),*);
    };
    ($ty:ident) => {
        concat_idents!(collect_t = collect, _, $ty, _, lossy {
            /// Returns the corresponding type by collecting the committed outputs of `bits`.
            ///
            /// If there are more bits in `bits` than [size_of::\<type\>](std::mem::size_of),
            /// the excess bits will be ignored.
            ///
            /// If there are less bits, the value will be 0 extended.
            pub(super) fn collect_t(&self, bits: &[GateIndex]) -> $ty {
                let mut output = 0;
                let mut mask = 1;

                for bit in bits.iter().take(std::mem::size_of::<$ty>()*8) {
                    if self.output_of(*bit) {
                        output |= mask
                    }

                    mask <<= 1;
                }

                output
            }
        });
    };
}

/// Data structure that represents a network of logic gates simulated one synchronous step at a time.
///
/// Gates are stored in the order they were added and identified by their position, a [GateIndex].
/// Position 0 is always [VOID], a gate that always outputs `false`.
/// Every new gate starts with VOID as its only input, so unconnected gates read `false` instead of garbage.
/// Connecting a real input to a gate replaces that placeholder.
///
/// The network keeps the committed output of every gate. Each step computes the output of every gate
/// from the *committed* outputs of its inputs, never from outputs computed in the same step,
/// see [GateNetwork::compute_next_outputs]. A change therefore needs one step per wire it crosses
/// and loops need no special treatment.
///
/// # Examples
/// Simple gates.
/// ```
/// # use logicstep::GateNetwork;
/// let mut g = GateNetwork::new();
///
/// let a = g.switch("a");
/// let b = g.switch("b");
/// g.set_held_value(a, true);
///
/// let or = g.or2(a, b, "or");
/// let and = g.and2(a, b, "and");
///
/// // One step for the switches to publish their values, one for the gates to read them.
/// g.tick();
/// g.tick();
/// assert_eq!(g.output_of(or), true);
/// assert_eq!(g.output_of(and), false);
/// ```
///
/// Leds!
/// ```
/// # use logicstep::GateNetwork;
/// # let mut g = GateNetwork::new();
/// let switch = g.switch("switch");
/// let not = g.not1(switch, "not");
/// let led = g.led1(not, "led");
///
/// g.run_until_stable(10).unwrap();
/// assert_eq!(g.is_on(led), true);
///
/// g.flip_switch(switch);
/// g.run_until_stable(10).unwrap();
/// assert_eq!(g.is_on(led), false);
/// ```
#[derive(Debug, Clone)]
pub struct GateNetwork {
    pub(super) gates: Vec<Gate>,
    // Maps "to -> from", in input order.
    pub(super) inputs: Vec<IndexSet<GateIndex>>,
    // True while the only input of a gate is the VOID it was created with.
    placeholders: Vec<bool>,
    pub(super) state: OutputState,
    output_handles: Vec<Output>,
    output_bits: HashSet<GateIndex>,
    #[cfg(feature = "debug_gates")]
    names: HashMap<GateIndex, String>,
    #[cfg(feature = "debug_gates")]
    pub(super) probes: HashMap<GateIndex, Probe>,
}

impl GateNetwork {
    /// Returns a new [GateNetwork] containing only [VOID].
    pub fn new() -> GateNetwork {
        #[cfg(feature = "debug_gates")]
        let names = {
            let mut names: HashMap<_, _> = Default::default();
            names.insert(VOID, "VOID".into());
            names
        };

        GateNetwork {
            gates: vec![Gate::Void],
            inputs: vec![IndexSet::new()],
            placeholders: vec![false],
            state: OutputState::new(1),
            output_handles: Default::default(),
            output_bits: Default::default(),
            #[cfg(feature = "debug_gates")]
            names,
            #[cfg(feature = "debug_gates")]
            probes: Default::default(),
        }
    }

    /// Discards every gate, connection, handle and probe, leaving only [VOID].
    pub fn reset(&mut self) {
        *self = GateNetwork::new();
    }

    /// Appends `gate` to the network and returns its [GateIndex].
    ///
    /// The new gate is wired to [VOID] and its committed output is `false`.
    pub fn add_gate(&mut self, gate: Gate) -> GateIndex {
        let idx = gi!(self.gates.len());
        self.gates.push(gate);
        let mut inputs = IndexSet::new();
        inputs.insert(VOID);
        self.inputs.push(inputs);
        self.placeholders.push(true);
        self.state.push(None);
        idx
    }

    /// Same as [GateNetwork::add_gate] but also saves the name of the gate.
    ///
    /// Providing a good name allows for a great debugging experience.
    /// You can disable the "debug_gates" feature to slightly increase performance.
    #[allow(unused_variables)]
    pub fn add_named_gate<S: Into<String>>(&mut self, gate: Gate, name: S) -> GateIndex {
        let idx = self.add_gate(gate);
        #[cfg(feature = "debug_gates")]
        self.names.insert(idx, name.into());
        idx
    }

    /// Panics with a helpful message if `gate` is not part of the network.
    fn check_bounds(&self, gate: GateIndex) {
        assert!(
            gate.idx < self.gates.len(),
            "Tried to access gate out of bounds:{}, len:{}",
            gate,
            self.gates.len()
        );
    }

    /// Appends `from` to the inputs of `to`, does nothing if they are already connected.
    ///
    /// The first connection made to a gate replaces the [VOID] it was created with,
    /// even if `from` is VOID itself.
    ///
    /// # Panics
    ///
    /// Will panic if `from` or `to` are not part of the network.
    ///
    /// Will panic if `to` is [VOID], VOID has no inputs.
    pub fn connect(&mut self, from: GateIndex, to: GateIndex) {
        self.check_bounds(from);
        self.check_bounds(to);
        assert!(!to.is_void(), "VOID has no inputs");

        let inputs = &mut self.inputs[to.idx];
        if self.placeholders[to.idx] {
            self.placeholders[to.idx] = false;
            inputs.clear();
        }
        inputs.insert(from);
    }

    /// Removes `from` from the inputs of `to`, keeping the order of the rest.
    /// Returns true if the gates were connected.
    ///
    /// Removing the last input leaves `to` with none, so it produces no output until it is connected again.
    ///
    /// # Panics
    ///
    /// Will panic if `from` or `to` are not part of the network.
    pub fn disconnect(&mut self, from: GateIndex, to: GateIndex) -> bool {
        self.check_bounds(from);
        self.check_bounds(to);

        let inputs = &mut self.inputs[to.idx];
        if !inputs.shift_remove(&from) {
            return false;
        }
        self.placeholders[to.idx] = false;
        true
    }

    /// Returns an iterator over the inputs of `gate`, in order.
    ///
    /// # Panics
    ///
    /// Will panic if `gate` is not part of the network.
    pub fn inputs(&self, gate: GateIndex) -> impl Iterator<Item = GateIndex> + '_ {
        self.check_bounds(gate);
        self.inputs[gate.idx].iter().copied()
    }

    /// Returns an immutable reference to the [Gate] at `idx`.
    ///
    /// # Panics
    ///
    /// Will panic if `idx` is not part of the network.
    #[inline(always)]
    pub fn get(&self, idx: GateIndex) -> &Gate {
        unwrap!(
            self.gates.get(idx.idx),
            "Tried to access gate out of bounds:{}, len:{}",
            idx,
            self.gates.len()
        )
    }

    /// Returns a mutable reference to the [Gate] at `idx`.
    ///
    /// # Panics
    ///
    /// Will panic if `idx` is not part of the network.
    #[inline(always)]
    fn get_mut(&mut self, idx: GateIndex) -> &mut Gate {
        let len = self.gates.len();
        unwrap!(
            self.gates.get_mut(idx.idx),
            "Tried to access gate out of bounds:{}, len:{}",
            idx,
            len
        )
    }

    /// Returns the [GateKind] of `gate`.
    pub fn kind(&self, gate: GateIndex) -> GateKind {
        self.get(gate).kind()
    }

    /// Sets the value `switch` will output on the next step.
    ///
    /// # Panics
    ///
    /// Will panic if `switch` is not a switch of the network.
    pub fn set_held_value(&mut self, switch: GateIndex, value: bool) {
        self.get_mut(switch).set_held_value(value)
    }

    /// Returns the value held by `switch`.
    ///
    /// # Panics
    ///
    /// Will panic if `switch` is not a switch of the network.
    pub fn held_value(&self, switch: GateIndex) -> bool {
        unwrap!(
            self.get(switch).held_value(),
            "Gate {} is a {}, not a Switch",
            switch,
            self.kind(switch)
        )
    }

    /// Sets the value held by `switch` to the opposite of its current value.
    ///
    /// # Panics
    ///
    /// Will panic if `switch` is not a switch of the network.
    pub fn flip_switch(&mut self, switch: GateIndex) {
        let value = self.held_value(switch);
        self.set_held_value(switch, !value)
    }

    /// Returns true if `led` was lit by the last evaluation.
    ///
    /// # Panics
    ///
    /// Will panic if `led` is not a led of the network.
    pub fn is_on(&self, led: GateIndex) -> bool {
        unwrap!(
            self.get(led).is_on(),
            "Gate {} is a {}, not a Led",
            led,
            self.kind(led)
        )
    }

    /// Returns the last committed output of `gate`. Gates that produced no output read `false`.
    ///
    /// # Panics
    ///
    /// Will panic if `gate` is not part of the network.
    pub fn output_of(&self, gate: GateIndex) -> bool {
        self.check_bounds(gate);
        self.state.get_state(gate.idx)
    }

    /// Returns the last committed [OutputState] of the network.
    pub fn outputs(&self) -> &OutputState {
        &self.state
    }

    /// Returns the [GateIndex] of a new switch.
    ///
    /// Providing a good name allows for a great debugging experience.
    /// You can disable the "debug_gates" feature to slightly increase performance.
    pub fn switch<S: Into<String>>(&mut self, name: S) -> GateIndex {
        self.add_named_gate(Gate::new(Switch), name)
    }

    /// Returns the [GateIndex] of a new led displaying `dep`.
    ///
    /// Providing a good name allows for a great debugging experience.
    /// You can disable the "debug_gates" feature to slightly increase performance.
    pub fn led1<S: Into<String>>(&mut self, dep: GateIndex, name: S) -> GateIndex {
        let idx = self.add_named_gate(Gate::new(Led), name);
        self.connect(dep, idx);
        idx
    }

    /// Returns the [GateIndex] of a new not gate wired to VOID.
    ///
    /// Providing a good name allows for a great debugging experience.
    /// You can disable the "debug_gates" feature to slightly increase performance.
    pub fn not<S: Into<String>>(&mut self, name: S) -> GateIndex {
        self.add_named_gate(Gate::new(Not), name)
    }

    /// Returns the [GateIndex] of a new not gate with 1 input.
    ///
    /// Providing a good name allows for a great debugging experience.
    /// You can disable the "debug_gates" feature to slightly increase performance.
    pub fn not1<S: Into<String>>(&mut self, dep: GateIndex, name: S) -> GateIndex {
        let idx = self.not(name);
        self.connect(dep, idx);
        idx
    }

    // Create constructors for all gate kinds with two inputs.
    gate_constructors!(or, nor, and, nand, xor, xnor);

    /// Returns a new [OutputHandle] with name `name` for the gates in `bits`.
    ///
    /// See [OutputHandle] for querying methods.
    pub fn output<S: Into<String>>(&mut self, bits: &[GateIndex], name: S) -> OutputHandle {
        for bit in bits {
            self.check_bounds(*bit);
            self.output_bits.insert(*bit);
        }
        self.output_handles.push(Output {
            bits: bits.into(),
            name: name.into(),
        });
        OutputHandle(self.output_handles.len() - 1)
    }

    /// Returns a new [OutputHandle] with name `name` for a single gate `bit`.
    ///
    /// See [OutputHandle] for querying methods.
    pub fn output1<S: Into<String>>(&mut self, bit: GateIndex, name: S) -> OutputHandle {
        self.output(&[bit], name)
    }

    /// Returns an immutable reference to the [Output] represented by `handle`.
    pub(super) fn get_output(&self, handle: OutputHandle) -> &Output {
        &self.output_handles[handle.0]
    }

    type_collectors!(u8, i8, u16, i16, u32, i32, u64, i64);

    /// Returns the number of gates in the network.
    // The network always contains VOID.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns the name of `gate`.
    #[cfg(feature = "debug_gates")]
    pub fn name(&self, gate: GateIndex) -> &str {
        self.names.get(&gate).map(String::as_str).unwrap_or("")
    }

    /// Returns the "full name" of `gate` in format:
    ///
    /// "OUT:?GATE_KIND:GATE_NAME" if the "debug_gates" feature is enabled.
    ///
    /// "OUT:?GATE_KIND" if the "debug_gates" feature is disabled.
    ///
    /// OUT:? means if the gate is an output it will be "OUT:" otherwise, it will be "".
    pub fn full_name(&self, gate: GateIndex) -> String {
        let out = if self.output_bits.contains(&gate) {
            "OUT:"
        } else {
            ""
        };
        #[cfg(feature = "debug_gates")]
        return format!("{}{}:{}", out, self.kind(gate), self.name(gate));
        #[cfg(not(feature = "debug_gates"))]
        format!("{}{}", out, self.kind(gate))
    }

    /// Returns the network in [dot](https://en.wikipedia.org/wiki/DOT_(graph_description_language)) format.
    /// Edges go from an input to the gate reading it.
    pub fn to_dot(&self) -> String {
        use petgraph::dot::{Config, Dot};
        let mut graph = petgraph::Graph::<_, ()>::new();
        let index: Vec<_> = (0..self.len())
            .map(|i| graph.add_node(self.full_name(gi!(i))))
            .collect();
        for (i, inputs) in self.inputs.iter().enumerate() {
            graph.extend_with_edges(inputs.iter().map(|input| (index[input.idx], index[i])));
        }
        format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }

    /// Dumps the network in [dot](https://en.wikipedia.org/wiki/DOT_(graph_description_language)) format
    /// to `path`, to be visualized by many supported tools, I recommend [gephi](https://gephi.org/).
    pub fn dump_dot<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        std::fs::write(path, self.to_dot())
    }

    /// "Probes" the gates in `bits`, meaning that whenever a commit changes the output of any of them,
    /// the new value of the group will be printed to stdout along with `name`.
    #[cfg(feature = "debug_gates")]
    pub fn probe<S: Into<String>>(&mut self, bits: &[GateIndex], name: S) {
        let name = name.into();
        for bit in bits {
            self.check_bounds(*bit);
            self.probes.insert(
                *bit,
                Probe {
                    name: name.clone(),
                    bits: smallvec::SmallVec::from_slice(bits),
                },
            );
        }
    }

    /// "Probes" the gate `bit`, meaning that whenever a commit changes its output,
    /// the new value will be printed to stdout along with `name`.
    #[cfg(feature = "debug_gates")]
    pub fn probe1<S: Into<String>>(&mut self, bit: GateIndex, name: S) {
        self.probe(&[bit], name)
    }
}

impl Default for GateNetwork {
    fn default() -> Self {
        Self::new()
    }
}
