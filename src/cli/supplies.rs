//! Supply calculator (`belt supplies`).

use anyhow::Result;
use beltquote::{DEFAULT_ROD_LENGTH_MM, LayoutOptions, compute_supplies};
use clap::Args;

/// Arguments for `belt supplies`.
#[derive(Args, Debug)]
pub struct SuppliesArgs {
    /// Total belt rows.
    #[arg(long)]
    pub rows: usize,
    /// Rows carrying pushers.
    #[arg(long = "pusher-rows", default_value_t = 0)]
    pub pusher_rows: usize,
    /// Belt width in millimetres.
    #[arg(long)]
    pub width: i64,
    #[arg(long)]
    pub pushers: bool,
    #[arg(long)]
    pub indentation: bool,
    /// Pin stock length in millimetres.
    #[arg(long = "rod-length", default_value_t = DEFAULT_ROD_LENGTH_MM)]
    pub rod_length: u32,
}

/// Execute the supplies command.
pub fn handle(args: SuppliesArgs) -> Result<()> {
    if args.pusher_rows > args.rows {
        anyhow::bail!(
            "pusher rows ({}) cannot exceed total rows ({})",
            args.pusher_rows,
            args.rows
        );
    }
    let options = LayoutOptions {
        with_pushers: args.pushers,
        with_indentation: args.indentation,
        ..LayoutOptions::default()
    };
    let supplies = compute_supplies(
        args.rows,
        args.pusher_rows,
        args.width,
        options,
        args.rod_length,
    );
    println!("Pins per rod: {}", supplies.pins_per_rod);
    println!("Pins required: {}", supplies.pins_required);
    println!("Rods required: {}", supplies.rods_required);
    println!("End caps required: {}", supplies.caps_required);
    Ok(())
}
