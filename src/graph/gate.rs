use std::fmt::{self, Display, Formatter};
use strum_macros::{EnumIter, IntoStaticStr};

/// Represents the index of a logic gate in a [super::GateNetwork].
///
/// Indexes are handed out sequentially by the network and never reused while the network lives.
#[repr(transparent)]
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub struct GateIndex {
    pub(super) idx: usize,
}

/// Returns a new GateIndex from a provided usize.
macro_rules! gi {
    ( $x:expr ) => {{
        GateIndex::new($x)
    }};
}

/// The [GateIndex] of the VOID sentinel in any [GateNetwork](super::GateNetwork).
///
/// VOID always outputs `false` and every new gate starts wired to it,
/// so an input that hasn't been connected yet reads as `false`.
pub const VOID: GateIndex = gi!(0);

impl GateIndex {
    /// Returns a new GateIndex from a provided usize.
    pub(super) const fn new(idx: usize) -> GateIndex {
        GateIndex { idx }
    }

    /// Returns the position of the gate in its network.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Returns true if `self` is the index of the VOID sentinel.
    ///
    /// # Example
    /// ```
    /// # use logicstep::{GateNetwork,VOID};
    /// let mut g = GateNetwork::new();
    ///
    /// let and = g.and("and");
    /// assert_eq!(and.is_void(), false);
    /// assert_eq!(VOID.is_void(), true);
    /// ```
    pub fn is_void(&self) -> bool {
        *self == VOID
    }
}
impl Display for GateIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.idx)
    }
}

/// Amount of input values kept in the stack while evaluating a gate.
/// If a gate is wired to more than GATE_INPUTS_TINYVEC_SIZE gates, they will spill into the heap.
pub(super) const GATE_INPUTS_TINYVEC_SIZE: usize = 2;

/// Enum representing the different kinds of gates in a gate network.
#[derive(Clone, Debug, Copy, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
pub enum GateKind {
    Void,
    Switch,
    Led,
    Xor,
    Xnor,
    Not,
    Or,
    And,
    Nand,
    Nor,
}
use GateKind::*;
impl GateKind {
    /// Returns the number of inputs a gate of this kind must be wired to in order to produce an output.
    pub fn required_input_count(&self) -> usize {
        match self {
            Void | Switch => 0,
            Not | Led => 1,
            Or | Nor | And | Nand | Xor | Xnor => 2,
        }
    }

    /// Combines the states of two inputs.
    /// Keep in mind if the gate [is negated](GateKind::is_negated) the result should be negated.
    ///
    /// # Example
    /// ```
    /// # use logicstep::GateKind;
    /// assert_eq!(GateKind::Or.accumulate(true, false), true);
    /// assert_eq!(GateKind::Nor.accumulate(true, false), true);
    ///
    /// assert_eq!(GateKind::And.accumulate(true, false), false);
    /// assert_eq!(GateKind::Nand.accumulate(true, false), false);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `self` is Void, Switch, Led or Not because those gate kinds don't have
    /// two inputs.
    #[inline(always)]
    pub fn accumulate(&self, acc: bool, b: bool) -> bool {
        match self {
            Or | Nor => acc | b,
            And | Nand => acc & b,
            Xor | Xnor => acc ^ b,
            Void | Switch | Led | Not => {
                unreachable!("Accumulate only works on gates with two inputs")
            }
        }
    }

    /// Returns true if `self` is [Not], [Nor], [Nand] or [Xnor].
    pub fn is_negated(&self) -> bool {
        matches!(self, Nor | Nand | Not | Xnor)
    }

    /// Returns true if gates of this kind read no inputs.
    pub fn is_source(&self) -> bool {
        matches!(self, Void | Switch)
    }
}
impl Display for GateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// A logic gate together with the state some kinds carry.
///
/// Gates don't know their own [GateIndex] or their inputs, the [GateNetwork](super::GateNetwork)
/// owning them does.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Gate {
    Void,
    And,
    Or,
    Xor,
    Not,
    Nand,
    Nor,
    Xnor,
    /// Toggle switch, outputs whatever value it has been set to.
    Switch { held_value: bool },
    /// Light emitting diode, displays its input and outputs nothing.
    Led { is_on: bool },
}

impl Gate {
    /// Returns a new [Gate] of kind `kind`, switches start off and leds start dark.
    pub fn new(kind: GateKind) -> Gate {
        match kind {
            Void => Gate::Void,
            Switch => Gate::Switch { held_value: false },
            Led => Gate::Led { is_on: false },
            Xor => Gate::Xor,
            Xnor => Gate::Xnor,
            Not => Gate::Not,
            Or => Gate::Or,
            And => Gate::And,
            Nand => Gate::Nand,
            Nor => Gate::Nor,
        }
    }

    /// Returns the [GateKind] of `self`.
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::Void => Void,
            Gate::Switch { .. } => Switch,
            Gate::Led { .. } => Led,
            Gate::Xor => Xor,
            Gate::Xnor => Xnor,
            Gate::Not => Not,
            Gate::Or => Or,
            Gate::And => And,
            Gate::Nand => Nand,
            Gate::Nor => Nor,
        }
    }

    /// See [GateKind::required_input_count].
    pub fn required_input_count(&self) -> usize {
        self.kind().required_input_count()
    }

    /// Calculates the output of the gate from the state of its inputs, ordered like its input wires.
    ///
    /// Returns [None] ("no output") if `inputs` doesn't have exactly
    /// [required_input_count](Gate::required_input_count) values, for every kind of gate.
    /// Leds always return [None], they record their input instead.
    ///
    /// # Example
    /// ```
    /// # use logicstep::Gate;
    /// let mut xor = Gate::Xor;
    /// assert_eq!(xor.evaluate(&[true, false]), Some(true));
    /// assert_eq!(xor.evaluate(&[true]), None);
    ///
    /// let mut led = Gate::Led { is_on: false };
    /// assert_eq!(led.evaluate(&[true]), None);
    /// assert_eq!(led.is_on(), Some(true));
    /// ```
    pub fn evaluate(&mut self, inputs: &[bool]) -> Option<bool> {
        if inputs.len() != self.required_input_count() {
            return None;
        }
        let kind = self.kind();
        match self {
            Gate::Void => Some(false),
            Gate::Switch { held_value } => Some(*held_value),
            Gate::Led { is_on } => {
                *is_on = inputs[0];
                None
            }
            Gate::Not => Some(!inputs[0]),
            Gate::Or | Gate::Nor | Gate::And | Gate::Nand | Gate::Xor | Gate::Xnor => {
                let new_state = kind.accumulate(inputs[0], inputs[1]);
                if kind.is_negated() {
                    Some(!new_state)
                } else {
                    Some(new_state)
                }
            }
        }
    }

    /// Sets the value a switch will output on its next evaluation.
    ///
    /// # Panics
    ///
    /// Will panic if `self` is not a switch.
    pub fn set_held_value(&mut self, value: bool) {
        match self {
            Gate::Switch { held_value } => *held_value = value,
            other => panic!("{} gates don't hold a value", other.kind()),
        }
    }

    /// Returns the value held by a switch, [None] for every other kind of gate.
    pub fn held_value(&self) -> Option<bool> {
        match self {
            Gate::Switch { held_value } => Some(*held_value),
            _ => None,
        }
    }

    /// Returns true if a led is lit, [None] for every other kind of gate.
    pub fn is_on(&self) -> Option<bool> {
        match self {
            Gate::Led { is_on } => Some(*is_on),
            _ => None,
        }
    }
}

impl From<GateKind> for Gate {
    fn from(kind: GateKind) -> Self {
        Gate::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const PAIRS: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

    fn truth_table(kind: GateKind) -> Vec<Option<bool>> {
        PAIRS
            .iter()
            .map(|(a, b)| Gate::new(kind).evaluate(&[*a, *b]))
            .collect()
    }

    #[test]
    fn test_two_input_truth_tables() {
        let t = Some(true);
        let f = Some(false);
        assert_eq!(truth_table(And), vec![f, f, f, t]);
        assert_eq!(truth_table(Or), vec![f, t, t, t]);
        assert_eq!(truth_table(Xor), vec![f, t, t, f]);
        assert_eq!(truth_table(Nand), vec![t, t, t, f]);
        assert_eq!(truth_table(Nor), vec![t, f, f, f]);
        assert_eq!(truth_table(Xnor), vec![t, f, f, t]);
    }

    #[test]
    fn test_not() {
        assert_eq!(Gate::Not.evaluate(&[false]), Some(true));
        assert_eq!(Gate::Not.evaluate(&[true]), Some(false));
    }

    #[test]
    fn test_wrong_input_count_is_no_output() {
        for kind in GateKind::iter() {
            let required = kind.required_input_count();
            for len in (0..=3).filter(|len| *len != required) {
                let inputs = vec![true; len];
                assert_eq!(
                    Gate::new(kind).evaluate(&inputs),
                    None,
                    "kind: {}, inputs: {}",
                    kind,
                    len
                );
            }
        }
    }

    #[test]
    fn test_required_input_count() {
        assert_eq!(Void.required_input_count(), 0);
        assert_eq!(Switch.required_input_count(), 0);
        assert_eq!(Not.required_input_count(), 1);
        assert_eq!(Led.required_input_count(), 1);
        for kind in [And, Or, Xor, Nand, Nor, Xnor].iter() {
            assert_eq!(kind.required_input_count(), 2, "kind: {}", kind);
        }
    }

    #[test]
    fn test_void_is_always_off() {
        assert_eq!(Gate::Void.evaluate(&[]), Some(false));
    }

    #[test]
    fn test_switch() {
        let mut switch = Gate::new(Switch);
        assert_eq!(switch.evaluate(&[]), Some(false));

        switch.set_held_value(true);
        assert_eq!(switch.held_value(), Some(true));
        assert_eq!(switch.evaluate(&[]), Some(true));
    }

    #[test]
    fn test_led_records_input() {
        let mut led = Gate::new(Led);
        assert_eq!(led.is_on(), Some(false));

        assert_eq!(led.evaluate(&[true]), None);
        assert_eq!(led.is_on(), Some(true));

        assert_eq!(led.evaluate(&[false]), None);
        assert_eq!(led.is_on(), Some(false));
    }

    #[test]
    fn test_led_ignores_wrong_input_count() {
        let mut led = Gate::Led { is_on: true };

        assert_eq!(led.evaluate(&[false, false]), None);
        assert_eq!(led.is_on(), Some(true));
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in GateKind::iter() {
            assert_eq!(Gate::new(kind).kind(), kind);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Led), "Led");
        assert_eq!(format!("{}", Xnor), "Xnor");
        assert_eq!(format!("{}", gi!(12)), "12");
    }

    #[test]
    #[should_panic(expected = "Not gates don't hold a value")]
    fn test_set_held_value_panics_on_gates() {
        Gate::Not.set_held_value(true);
    }
}
