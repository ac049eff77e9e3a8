use crate::core::layout::{LayoutOptions, LayoutResult};
use crate::core::pattern::Width;
use serde::{Deserialize, Serialize};

/// Standard pin stock length.
pub const DEFAULT_ROD_LENGTH_MM: u32 = 2500;
/// Spare pins added to every order.
pub const PIN_GIFT: usize = 5;
/// Spare end-caps added to every order.
pub const CAP_GIFT: usize = 10;

/// Pins, rods and end-caps needed for a belt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplies {
    pub pins_per_rod: usize,
    pub pins_required: usize,
    pub rods_required: usize,
    pub caps_required: usize,
    pub rod_length_mm: u32,
}

/// Derive pin, rod and cap counts from row totals.
///
/// One pin per row plus [`PIN_GIFT`]. When the belt is wider than a rod no
/// pin can be cut twice from it, so rods fall back to one per pin. Caps close
/// both ends of every row, except indented pusher rows which end in modules.
pub fn compute_supplies(
    total_rows: usize,
    pusher_row_count: usize,
    tiled_width: Width,
    options: LayoutOptions,
    rod_length_mm: u32,
) -> Supplies {
    let pins_per_rod = if tiled_width > 0 {
        (i64::from(rod_length_mm) / tiled_width) as usize
    } else {
        0
    };

    let pins_required = total_rows + PIN_GIFT;
    let rods_required = if pins_per_rod == 0 {
        pins_required
    } else {
        pins_required.div_ceil(pins_per_rod)
    };

    let base_caps = if options.with_pushers && options.with_indentation {
        total_rows * 2 - pusher_row_count * 2
    } else {
        total_rows * 2
    };
    let caps_required = base_caps + CAP_GIFT;

    tracing::debug!(
        pins_per_rod,
        pins_required,
        rods_required,
        caps_required,
        "computed belt supplies"
    );

    Supplies {
        pins_per_rod,
        pins_required,
        rods_required,
        caps_required,
        rod_length_mm,
    }
}

impl Supplies {
    /// Supplies for an already classified layout.
    pub fn for_layout(layout: &LayoutResult, options: LayoutOptions, rod_length_mm: u32) -> Self {
        compute_supplies(
            layout.total_rows,
            layout.pusher_row_count,
            layout.tiled_width,
            options,
            rod_length_mm,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(with_pushers: bool, with_indentation: bool) -> LayoutOptions {
        LayoutOptions {
            with_pushers,
            with_indentation,
            ..LayoutOptions::default()
        }
    }

    #[test]
    fn pins_and_rods_for_seventy_centimetre_belt() {
        let s = compute_supplies(90, 22, 700, opts(true, false), DEFAULT_ROD_LENGTH_MM);
        assert_eq!(s.pins_per_rod, 3);
        assert_eq!(s.pins_required, 95);
        assert_eq!(s.rods_required, 32);
    }

    #[test]
    fn caps_skip_indented_pusher_rows() {
        let s = compute_supplies(90, 22, 700, opts(true, true), DEFAULT_ROD_LENGTH_MM);
        assert_eq!(s.caps_required, 146);
    }

    #[test]
    fn caps_cover_every_row_without_indentation() {
        let plain = compute_supplies(90, 0, 700, opts(false, false), DEFAULT_ROD_LENGTH_MM);
        let pushers = compute_supplies(90, 22, 700, opts(true, false), DEFAULT_ROD_LENGTH_MM);
        assert_eq!(plain.caps_required, 190);
        assert_eq!(pushers.caps_required, 190);
    }

    #[test]
    fn indentation_alone_does_not_change_caps() {
        let s = compute_supplies(90, 0, 700, opts(false, true), DEFAULT_ROD_LENGTH_MM);
        assert_eq!(s.caps_required, 190);
    }

    #[test]
    fn belt_wider_than_rod_uses_one_rod_per_pin() {
        let s = compute_supplies(40, 0, 3000, opts(false, false), DEFAULT_ROD_LENGTH_MM);
        assert_eq!(s.pins_per_rod, 0);
        assert_eq!(s.pins_required, 45);
        assert_eq!(s.rods_required, 45);
    }

    #[test]
    fn zero_width_belt_does_not_divide_by_zero() {
        let s = compute_supplies(10, 0, 0, opts(false, false), DEFAULT_ROD_LENGTH_MM);
        assert_eq!(s.pins_per_rod, 0);
        assert_eq!(s.rods_required, 15);
    }

    #[test]
    fn exact_rod_multiple_is_not_rounded_down() {
        let s = compute_supplies(95, 0, 500, opts(false, false), DEFAULT_ROD_LENGTH_MM);
        assert_eq!(s.pins_per_rod, 5);
        assert_eq!(s.rods_required, 20);
    }
}
