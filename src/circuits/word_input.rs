use crate::graph::*;
use smallvec::SmallVec;

fn mkname(name: String) -> String {
    format!("WI:{}", name)
}
/// Data Structure that allows you to easily manage a group of switches.
///
/// Setting a [WordInput] only changes the values held by its switches,
/// the network sees them on its next step.
///
/// # Example
/// ```
/// # use logicstep::{GateNetwork,WordInput};
/// # let mut g = GateNetwork::new();
/// let input = WordInput::new(&mut g, 3, "input");
///
/// let output = g.output(&input.bits(), "result");
///
/// assert_eq!(output.u8(&g), 0);
///
/// input.set_to(&mut g, 2);
/// g.tick();
/// assert_eq!(output.u8(&g), 2);
///
/// input.set_bit(&mut g, 0);
/// g.tick();
/// assert_eq!(output.u8(&g), 3);
///
/// input.flip_bit(&mut g, 1);
/// g.tick();
/// assert_eq!(output.u8(&g), 1);
/// ```
#[derive(Debug, Clone)]
pub struct WordInput {
    switches: Vec<GateIndex>,
}
impl WordInput {
    /// Returns a new [WordInput] of width `width` with name `name`.
    pub fn new<S: Into<String>>(g: &mut GateNetwork, width: usize, name: S) -> Self {
        let name = mkname(name.into());
        Self {
            switches: (0..width)
                .map(|i| g.switch(format!("{}{}", name, i)))
                .collect(),
        }
    }

    /// Sets the switch at index `bit` to `value`.
    ///
    /// Returns None if the [WordInput] has no bit `bit`.
    pub fn update_bit(&self, g: &mut GateNetwork, bit: usize, value: bool) -> Option<()> {
        let switch = self.switches.get(bit)?;
        g.set_held_value(*switch, value);
        Some(())
    }

    /// Flips the switch at index `bit`.
    pub fn flip_bit(&self, g: &mut GateNetwork, bit: usize) -> Option<()> {
        let switch = self.switches.get(bit)?;
        g.flip_switch(*switch);
        Some(())
    }

    /// Sets the switch at index `bit` to true.
    pub fn set_bit(&self, g: &mut GateNetwork, bit: usize) -> Option<()> {
        self.update_bit(g, bit, true)
    }

    /// Sets the switch at index `bit` to false.
    pub fn reset_bit(&self, g: &mut GateNetwork, bit: usize) -> Option<()> {
        self.update_bit(g, bit, false)
    }

    /// Sets the switches to the bits of `value`, bit 0 being the least significant.
    /// If the [WordInput] is wider than 64 bits, the value will be 0 extended.
    pub fn set_to(&self, g: &mut GateNetwork, value: u64) {
        for (i, switch) in self.switches.iter().enumerate() {
            let bit = i < 64 && (value >> i) & 1 == 1;
            g.set_held_value(*switch, bit);
        }
    }

    /// Sets all the switches to false.
    pub fn reset(&self, g: &mut GateNetwork) {
        self.set_to(g, 0)
    }

    /// Returns a [SmallVec]<[GateIndex]> to connect to other components.
    pub fn bits(&self) -> SmallVec<[GateIndex; 8]> {
        self.switches.iter().copied().collect()
    }

    /// Returns the width of the [WordInput].
    pub fn len(&self) -> usize {
        self.switches.len()
    }

    /// Returns true the width of the [WordInput] == 0.
    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_to() {
        let mut g = GateNetwork::new();
        let input = WordInput::new(&mut g, 8, "input");
        let output = g.output(&input.bits(), "output");

        for value in [0u64, 1, 0b1010_0101, 255, 256 + 7].iter() {
            input.set_to(&mut g, *value);
            g.tick();
            assert_eq!(output.u8(&g), *value as u8);
        }
    }

    #[test]
    fn test_bits_out_of_range() {
        let mut g = GateNetwork::new();
        let input = WordInput::new(&mut g, 2, "input");

        assert_eq!(input.len(), 2);
        assert_eq!(input.set_bit(&mut g, 2), None);
        assert_eq!(input.reset_bit(&mut g, 1), Some(()));
    }
}
