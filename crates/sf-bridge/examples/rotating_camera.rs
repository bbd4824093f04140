//! Headless Bridge Walkthrough
//!
//! Wires a 4-channel clip through the null renderer, settles
//! initialization, then spins the listener a full turn while the
//! orientation sync pushes rotations into the renderer.
//!
//! Run with: cargo run --example rotating_camera

use std::sync::Arc;

use nalgebra::{Rotation3, Vector3};
use parking_lot::Mutex;

use sf_bridge::{
    BridgeEvent, HeadCamera, NullRendererFactory, OrientationSync, RenderingMode, SoundFieldBridge,
};
use sf_core::{HostCapabilities, RendererOptions};
use sf_graph::{MediaElement, OfflineGraph, shared};

struct SpinningCamera {
    yaw: f32,
}

impl HeadCamera for SpinningCamera {
    fn update_matrix(&mut self) {}

    fn matrix(&self) -> [f32; 16] {
        let transform = Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw).to_homogeneous();
        let mut elements = [0.0; 16];
        elements.copy_from_slice(transform.as_slice());
        elements
    }
}

fn main() {
    env_logger::init();

    println!("=== SoundField Bridge Walkthrough ===\n");

    let graph = shared(OfflineGraph::default());
    let factory = NullRendererFactory::new();
    let probe = factory.probe();

    let element = MediaElement::new("city-tour-360.mp4", 4);
    let options = RendererOptions::new()
        .with_ambisonic_order(1)
        .with_post_gain_db(-3.0);

    let mut bridge = SoundFieldBridge::new(
        graph,
        &element,
        &options,
        HostCapabilities::native(),
        &factory,
    )
    .expect("bridge setup");
    let events = bridge.subscribe();

    // Drive the host loop until the renderer settles.
    while bridge.poll_init().is_none() {}
    match events.try_recv() {
        Ok(BridgeEvent::Ready) => println!("✓ renderer ready, audio wired through"),
        Ok(BridgeEvent::Error(err)) => {
            println!("renderer failed: {err}");
            return;
        }
        Err(_) => unreachable!("outcome is dispatched on settle"),
    }

    let camera = Arc::new(Mutex::new(SpinningCamera { yaw: 0.0 }));
    let bridge = bridge.into_shared();
    let sync = OrientationSync::new(bridge.clone(), camera.clone());

    println!("\n--- Spinning the listener ---");
    for frame in 0..8 {
        camera.lock().yaw = frame as f32 * std::f32::consts::FRAC_PI_4;
        sync.update();

        let rotation = probe.last_rotation().expect("rotation forwarded");
        println!(
            "frame {frame}: forward = ({:+.2}, {:+.2}, {:+.2})",
            rotation[(0, 2)],
            rotation[(1, 2)],
            rotation[(2, 2)]
        );
    }

    bridge.lock().set_mode(RenderingMode::Bypass);
    println!(
        "\n✓ renderer switched to '{}' mode",
        probe.last_mode().expect("mode forwarded")
    );
}
