//! Basic example driving the pocket cube machine from a PC.
//!
//! This example shows how to:
//! - Connect to the device via serial port and wait for it to home
//! - Send raw servo commands
//! - Perform face turns with orientation tracking
//! - Park the servos before disconnecting
//!
//! Set the `POCKET_CUBE_UART` environment variable to your serial port path,
//! or leave it unset to probe `/dev/ttyACM*` and `/dev/ttyUSB*`.

use pocket_cube_rs::host::{CubeLink, HostConfig, HostResult, PocketCube};
use pocket_cube_rs::{FaceTurn, Mode};
use std::time::Duration;

fn main() -> HostResult<()> {
    let config = HostConfig::from_env()?;
    println!("Connecting to: {:?}", config.port_path);

    let link = CubeLink::connect(&config)?;
    let mut cube = PocketCube::new(link, Mode::SpiCor)?;
    println!("Device ready");

    // === Front turn and back ===
    println!("\n=== F f ===");
    for turn in [FaceTurn::F, FaceTurn::FPrime] {
        let physical = cube.rotate_cube(turn)?;
        println!(
            "{} -> {} (orientation {:?})",
            turn.notation(),
            physical.notation(),
            cube.orientation()
        );
    }

    // === Short sequence ===
    println!("\n=== R u F2 ===");
    cube.rotate_sequence("R u F2")?;
    println!("Orientation: {:?}", cube.orientation());

    // === Cleanup ===
    println!("\n=== Done ===");
    cube.shutdown(Duration::from_secs(5))?;
    Ok(())
}
