use super::{GateIndex, GateNetwork};
use concat_idents::concat_idents;
use smallvec::SmallVec;
use unwrap::unwrap;

/// Named group of gates printed to stdout by [GateNetwork::update_outputs]
/// whenever a commit changes the output of any of them.
#[cfg(feature = "debug_gates")]
#[derive(Debug, Clone)]
pub(super) struct Probe {
    pub name: String,
    pub bits: SmallVec<[GateIndex; 1]>,
}

/// Generates a reader and a printer on [OutputHandle] for every integer type listed.
macro_rules! word_readers {
    (@reader $ty:ident) => {
        concat_idents!(collect_t = collect, _, $ty, _, lossy {
            /// Reads the committed outputs of the handle as a word, bit 0 being the least significant.
            /// Excess bits are ignored and bits that produced no output read as 0.
            pub fn $ty(self, g: &GateNetwork) -> $ty {
                g.collect_t(&g.get_output(self).bits)
            }
        });
        concat_idents!(print_t = print, _, $ty {
            pub fn print_t(self, g: &GateNetwork) {
                println!("{}: {}", self.name(g), self.$ty(g));
            }
        });
    };
    ($($ty:ident),*) => {
        $(word_readers!(@reader $ty);)*
    };
}

/// Handle to a named group of gates whose committed outputs are read together.
///
/// Created by [GateNetwork::output]. Handles only read the outputs committed by the last
/// [update_outputs](GateNetwork::update_outputs), a gate that produced no output on that step
/// (a led, or a gate with the wrong number of inputs) reads as `false`.
/// Use [OutputHandle::bx_if_driven] to tell the two apart.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OutputHandle(pub(super) usize);

/// Gates behind an [OutputHandle].
#[derive(Debug, Clone)]
pub struct Output {
    pub(super) name: String,
    pub(super) bits: SmallVec<[GateIndex; 1]>,
}

impl OutputHandle {
    word_readers!(u8, i8, u16, i16, u32, i32, u64, i64);

    /// Returns the name the handle was created with.
    pub fn name(self, g: &GateNetwork) -> &str {
        &g.get_output(self).name
    }

    /// Returns the number of gates in the handle.
    pub fn len(self, g: &GateNetwork) -> usize {
        g.get_output(self).bits.len()
    }

    /// Returns the [GateIndex] of bit `n` of the handle.
    ///
    /// # Panics
    ///
    /// Will panic if the handle has less than `n` + 1 bits.
    pub fn bit(self, g: &GateNetwork, n: usize) -> GateIndex {
        let output = g.get_output(self);
        *unwrap!(
            output.bits.get(n),
            "Tried to read bit {} of output {}, it has {} bits",
            n,
            output.name,
            output.bits.len()
        )
    }

    /// Returns the committed output of bit `n`, `false` if that gate produced no output.
    ///
    /// # Panics
    ///
    /// Will panic if the handle has less than `n` + 1 bits.
    pub fn bx(self, g: &GateNetwork, n: usize) -> bool {
        g.output_of(self.bit(g, n))
    }

    /// Returns the committed output of bit `n`, [None] if that gate produced no output.
    ///
    /// # Example
    /// ```
    /// # use logicstep::GateNetwork;
    /// let mut g = GateNetwork::new();
    /// let switch = g.switch("switch");
    /// let led = g.led1(switch, "led");
    /// let output = g.output(&[switch, led], "output");
    ///
    /// g.tick();
    /// assert_eq!(output.bx_if_driven(&g, 0), Some(false));
    /// assert_eq!(output.bx_if_driven(&g, 1), None);
    /// ```
    ///
    /// # Panics
    ///
    /// Will panic if the handle has less than `n` + 1 bits.
    pub fn bx_if_driven(self, g: &GateNetwork, n: usize) -> Option<bool> {
        g.outputs().get_if_driven(self.bit(g, n).index())
    }

    /// Same as [bx](OutputHandle::bx) with `n` = 0.
    pub fn b0(self, g: &GateNetwork) -> bool {
        self.bx(g, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_readers() {
        let mut g = GateNetwork::new();
        let bits: Vec<_> = (0..8).map(|i| g.switch(format!("s{}", i))).collect();
        let output = g.output(&bits, "word");

        for bit in &bits {
            g.set_held_value(*bit, true);
        }
        g.tick();

        assert_eq!(output.u8(&g), 255);
        assert_eq!(output.i8(&g), -1);
        assert_eq!(output.u16(&g), 255);
        assert_eq!(output.i64(&g), 255);
        assert_eq!(output.name(&g), "word");
        assert_eq!(output.len(&g), 8);
    }

    #[test]
    fn test_undriven_bits_read_false() {
        let mut g = GateNetwork::new();
        let switch = g.switch("switch");
        let led = g.led1(switch, "led");
        let lonely = g.and1(switch, "lonely");
        let output = g.output(&[led, lonely, switch], "output");

        g.set_held_value(switch, true);
        g.tick();

        assert_eq!(output.u8(&g), 0b100);
        assert_eq!(output.b0(&g), false);
        assert_eq!(output.bx_if_driven(&g, 0), None);
        assert_eq!(output.bx_if_driven(&g, 1), None);
        assert_eq!(output.bx_if_driven(&g, 2), Some(true));
    }

    #[test]
    #[should_panic(expected = "Tried to read bit 2 of output pair, it has 2 bits")]
    fn test_bit_out_of_range_panics() {
        let mut g = GateNetwork::new();
        let a = g.switch("a");
        let b = g.switch("b");
        let output = g.output(&[a, b], "pair");
        output.bx(&g, 2);
    }
}
