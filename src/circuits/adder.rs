use crate::graph::*;

fn mkname(name: String) -> String {
    format!("ADDER:{}", name)
}

/// Returns the sum and carry outputs of a [full adder](https://en.wikipedia.org/wiki/Adder_(electronics)#Full_adder).
pub fn full_adder<S: Into<String>>(
    g: &mut GateNetwork,
    a: GateIndex,
    b: GateIndex,
    cin: GateIndex,
    name: S,
) -> (GateIndex, GateIndex) {
    let name = mkname(name.into());

    let x = g.xor2(a, b, name.clone());
    let sum = g.xor2(x, cin, name.clone());
    let both = g.and2(a, b, name.clone());
    let carried = g.and2(x, cin, name.clone());
    let cout = g.or2(carried, both, name);

    (sum, cout)
}

/// Returns the outputs of a ripple carry adder adding `input1`, `input2` and `cin`.
/// The last output is the carry out, so there is one more output than input bits.
///
/// Every full adder in the chain adds a few steps of latency,
/// run the network until it is stable before reading the result.
///
/// # Example
/// ```
/// # use logicstep::{GateNetwork,WordInput,ripple_adder,VOID};
/// # let mut g = GateNetwork::new();
/// let a = WordInput::new(&mut g, 8, "a");
/// let b = WordInput::new(&mut g, 8, "b");
///
/// let sum = ripple_adder(&mut g, VOID, &a.bits(), &b.bits(), "adder");
/// let output = g.output(&sum, "sum");
///
/// a.set_to(&mut g, 200);
/// b.set_to(&mut g, 100);
/// g.run_until_stable(100).unwrap();
///
/// assert_eq!(output.u16(&g), 300);
/// ```
///
/// # Panics
///
/// Will panic if `input1` and `input2` have different widths.
pub fn ripple_adder<S: Into<String>>(
    g: &mut GateNetwork,
    mut cin: GateIndex,
    input1: &[GateIndex],
    input2: &[GateIndex],
    name: S,
) -> Vec<GateIndex> {
    assert_eq!(input1.len(), input2.len());
    let name = name.into();

    let mut outputs = Vec::with_capacity(input1.len() + 1);
    for (a, b) in input1.iter().zip(input2) {
        let (sum, cout) = full_adder(g, *a, *b, cin, name.clone());
        outputs.push(sum);
        cin = cout;
    }
    outputs.push(cin);
    outputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::WordInput;

    #[test]
    fn test_full_adder() {
        let mut g = GateNetwork::new();
        let input = WordInput::new(&mut g, 3, "input");
        let bits = input.bits();
        let (sum, cout) = full_adder(&mut g, bits[0], bits[1], bits[2], "fa");

        for value in 0..8u64 {
            input.set_to(&mut g, value);
            g.run_until_stable(20).unwrap();

            let ones = value.count_ones();
            assert_eq!(g.output_of(sum), ones % 2 == 1, "value: {}", value);
            assert_eq!(g.output_of(cout), ones >= 2, "value: {}", value);
        }
    }

    #[test]
    fn test_ripple_adder() {
        let mut g = GateNetwork::new();
        let a = WordInput::new(&mut g, 8, "a");
        let b = WordInput::new(&mut g, 8, "b");
        let cin = g.switch("cin");

        let sum = ripple_adder(&mut g, cin, &a.bits(), &b.bits(), "adder");
        assert_eq!(sum.len(), 9);
        let output = g.output(&sum, "sum");

        let cases = [(0u64, 0u64, false), (1, 1, false), (255, 1, false), (100, 27, true), (255, 255, true)];
        for (x, y, carry) in cases.iter() {
            a.set_to(&mut g, *x);
            b.set_to(&mut g, *y);
            g.set_held_value(cin, *carry);
            g.run_until_stable(100).unwrap();

            assert_eq!(output.u16(&g) as u64, x + y + *carry as u64, "{} + {} + {}", x, y, carry);
        }
    }
}
