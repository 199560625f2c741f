use crate::graph::*;

fn mkname(name: String) -> String {
    format!("RING:{}", name)
}

/// Returns the first gate of a ring of `length` not gates, each one reading the previous one
/// and the first one reading the last one.
///
/// The ring never stabilizes, every gate starts at false and flips on every step.
///
/// # Example
///
/// ```
/// # use logicstep::{GateNetwork,ring_oscillator};
/// # let mut g = GateNetwork::new();
/// let tap = ring_oscillator(&mut g, 3, "ring");
///
/// g.tick();
/// assert_eq!(g.output_of(tap), true);
/// g.tick();
/// assert_eq!(g.output_of(tap), false);
///
/// assert!(g.run_until_stable(100).is_err());
/// ```
///
/// # Panics
///
/// Will panic if `length` is 0.
pub fn ring_oscillator<S: Into<String>>(g: &mut GateNetwork, length: usize, name: S) -> GateIndex {
    assert!(length > 0, "A ring needs at least one gate");
    let name = mkname(name.into());

    let first = g.not(name.clone());
    let mut last = first;
    for _ in 1..length {
        last = g.not1(last, name.clone());
    }
    g.connect(last, first);

    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_oscillator() {
        for length in 1..6 {
            let mut g = GateNetwork::new();
            let tap = ring_oscillator(&mut g, length, "ring");
            let gates: Vec<_> = (0..g.len()).map(|i| g.outputs().get_state(i)).collect();
            assert_eq!(gates.len(), length + 1);

            let mut expected = false;
            for _ in 0..10 {
                assert_eq!(g.output_of(tap), expected, "length: {}", length);
                g.tick();
                expected = !expected;
            }
        }
    }

    #[test]
    #[should_panic(expected = "A ring needs at least one gate")]
    fn test_empty_ring_panics() {
        let mut g = GateNetwork::new();
        ring_oscillator(&mut g, 0, "ring");
    }
}
