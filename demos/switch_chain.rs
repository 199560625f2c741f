use logicstep::*;

fn show_status(g: &GateNetwork, led: GateIndex) {
    if g.is_on(led) {
        colour::green_ln!("LED is on");
    } else {
        colour::dark_grey_ln!("LED is off");
    }
    println!("{:?}", g.outputs().to_vec());
}

fn main() {
    let g = &mut GateNetwork::new();

    let not1 = g.not("not1");
    let not2 = g.not("not2");
    let switch = g.switch("switch");
    let led = g.add_named_gate(Gate::new(GateKind::Led), "led");

    g.set_held_value(switch, true);
    g.connect(switch, not1);
    g.connect(not1, not2);
    g.connect(not2, led);
    #[cfg(feature = "debug_gates")]
    g.probe1(not2, "not2");

    colour::cyan_ln!("first");
    show_status(g, led);

    for i in 1..=4 {
        colour::cyan_ln!("iteration {}", i);
        let outputs = g.compute_next_outputs();
        g.update_outputs(outputs);
        show_status(g, led);
    }

    if let Err(e) = g.dump_dot("switch_chain.dot") {
        colour::red_ln!("Couldn't write switch_chain.dot: {}", e);
    }
}
