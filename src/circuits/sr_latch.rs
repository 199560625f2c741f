use crate::graph::*;

fn mkname(name: String) -> String {
    format!("SRLATCH:{}", name)
}

/// Returns the Q output of an [SR latch](https://en.wikipedia.org/wiki/Flip-flop_(electronics)#SR_NOR_latch).
///
/// # Example
///
/// ```
/// # use logicstep::{GateNetwork,sr_latch};
/// # let mut g = GateNetwork::new();
/// let s = g.switch("s");
/// let r = g.switch("r");
///
/// let q = sr_latch(&mut g, s, r, "latch");
///
/// // Both nors start at false and read each other one step late,
/// // so the latch oscillates until it is reset.
/// g.pulse_switch_stable(r);
/// assert_eq!(g.output_of(q), false);
///
/// g.pulse_switch_stable(s);
/// assert_eq!(g.output_of(q), true);
///
/// g.pulse_switch_stable(r);
/// assert_eq!(g.output_of(q), false);
/// ```
pub fn sr_latch<S: Into<String>>(
    g: &mut GateNetwork,
    s: GateIndex,
    r: GateIndex,
    name: S,
) -> GateIndex {
    let name = mkname(name.into());

    let q = g.nor1(r, name.clone());

    let nq = g.nor2(s, q, name);
    g.connect(nq, q);

    q
}
