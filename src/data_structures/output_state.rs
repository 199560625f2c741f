use num_integer::div_ceil;
use std::iter::FromIterator;
use unwrap::unwrap;

/// Returns the index and mask necessary to access the bit at `index` in a ```&[u64]```.
///
/// # Example
///
/// ```
/// # use logicstep::data_structures::word_mask_64;
/// let word_slice = [0u64, 1u64];
/// let bit_index = 64;
///
/// let (word_index, mask) = word_mask_64(bit_index);
/// let bit_set = (word_slice[word_index] & mask) != 0;
///
/// assert_eq!(bit_set, true);
/// ```
#[inline(always)]
pub fn word_mask_64(index: usize) -> (usize, u64) {
    (index / 64, 1u64 << (index % 64))
}

/// Data structure that holds one output bit per gate of a [GateNetwork](crate::GateNetwork).
///
/// Next to every output bit, [OutputState] keeps a "driven" bit which tells if the gate produced a value
/// during the step that created the state, or the "no output" sentinel. Gates that produced no output
/// read as `false`, so downstream gates always see a fully populated vector of booleans.
///
/// Bits are stored in words of 64 but [OutputState::len] is exactly the number of gates.
/// # Example
/// ```
/// # use logicstep::data_structures::OutputState;
/// let mut s = OutputState::new(2);
///
/// assert_eq!(s.len(), 2);
///
/// s.set(1, Some(true));
/// assert_eq!(s.get_state(1), true);
/// assert_eq!(s.get_driven(1), true);
///
/// s.set(1, None);
/// assert_eq!(s.get_state(1), false);
/// assert_eq!(s.get_if_driven(1), None);
/// ```
///
/// # Panics
///
/// Panics if you try to read or write to an index >= [OutputState::len()]
///
/// ```should_panic
/// # use logicstep::data_structures::OutputState;
/// let s = OutputState::new(2);
///
/// s.get_state(2);
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct OutputState {
    states: Vec<u64>,
    driven: Vec<u64>,
    len: usize,
}
impl OutputState {
    /// Returns a new [OutputState] with `n` bits all of which are `false` and not driven.
    pub fn new(n: usize) -> OutputState {
        let states = vec![0; div_ceil(n, 64)];
        let driven = vec![0; div_ceil(n, 64)];

        OutputState {
            states,
            driven,
            len: n,
        }
    }

    /// Returns true if the bit at `index` is 1 in vector `v`.
    #[inline(always)]
    fn get_bit_from_vec(&self, v: &[u64], index: usize) -> bool {
        let (word_index, mask) = word_mask_64(index);
        let word = unwrap!(
            v.get(word_index).filter(|_| index < self.len),
            "Tried to access index out of bounds:{}, size:{}",
            index,
            self.len,
        );

        word & mask != 0
    }

    /// Returns the output of the gate at `index`, "no output" reads as `false`.
    ///
    /// # Panics
    ///
    /// Panics if `index` >= [OutputState::len()]
    pub fn get_state(&self, index: usize) -> bool {
        self.get_bit_from_vec(&self.states, index)
    }

    /// Returns true if the gate at `index` produced a value, false if it produced "no output".
    ///
    /// # Panics
    ///
    /// Panics if `index` >= [OutputState::len()]
    pub fn get_driven(&self, index: usize) -> bool {
        self.get_bit_from_vec(&self.driven, index)
    }

    /// Returns the output of the gate at `index`.
    /// Returns None if the gate produced "no output".
    ///
    /// # Panics
    ///
    /// Panics if `index` >= [OutputState::len()]
    pub fn get_if_driven(&self, index: usize) -> Option<bool> {
        if self.get_driven(index) {
            Some(self.get_state(index))
        } else {
            None
        }
    }

    /// Sets the bit at `index` to `value`, [None] stores the "no output" sentinel.
    ///
    /// # Panics
    ///
    /// Panics if `index` >= [OutputState::len()]
    pub fn set(&mut self, index: usize, value: Option<bool>) {
        assert!(
            index < self.len,
            "Tried to write to index:{} >= OutputState::len():{}",
            index,
            self.len
        );
        let (word_index, mask) = word_mask_64(index);

        let state = &mut self.states[word_index];
        if value == Some(true) {
            *state |= mask;
        } else {
            *state &= !mask;
        }

        let driven = &mut self.driven[word_index];
        if value.is_some() {
            *driven |= mask;
        } else {
            *driven &= !mask;
        }
    }

    /// Appends a new bit with `value` at the end of the state.
    pub fn push(&mut self, value: Option<bool>) {
        if self.len == self.states.len() * 64 {
            self.states.push(0);
            self.driven.push(0);
        }
        self.len += 1;
        self.set(self.len - 1, value);
    }

    /// Returns the number of bits in the [OutputState].
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the [OutputState] holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the output of every gate, in [GateIndex](crate::GateIndex) order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get_state(i))
    }

    /// Returns the output of every gate as a [Vec].
    pub fn to_vec(&self) -> Vec<bool> {
        self.iter().collect()
    }
}

impl FromIterator<Option<bool>> for OutputState {
    fn from_iter<I: IntoIterator<Item = Option<bool>>>(iter: I) -> Self {
        let mut state = OutputState::new(0);
        for value in iter {
            state.push(value);
        }
        state
    }
}
