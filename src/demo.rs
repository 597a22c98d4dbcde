//! Built-in demo menu: settings for a small robot's power and motor boards.
//!
//! Used when no menu file is given. Exercises every variable kind, a
//! back-link cycle on every sub-screen and a callback that keeps a derived
//! value in sync.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::cell::{Primitive, VariableCell};
use crate::config::LoadedMenu;
use crate::error::MenuError;
use crate::label::Label;
use crate::layout::{Layout, Menu};
use crate::navigator::{DEFAULT_LOG_COLUMN, DEFAULT_LOG_LENGTH};

/// Storage registry for the demo; every handle is also kept by name.
struct Vars(BTreeMap<String, VariableCell>);

impl Vars {
    fn add<T: Primitive>(&mut self, name: &str, value: T) -> Rc<Cell<T>> {
        let storage = Rc::new(Cell::new(value));
        self.0.insert(name.to_string(), VariableCell::bind(&storage));
        storage
    }
}

/// Fails only if the link table below names a label that does not exist.
pub fn demo_menu() -> Result<LoadedMenu, MenuError> {
    let mut vars = Vars(BTreeMap::new());

    let emg_rq = vars.add("EMG_RQ", false);
    let ova = vars.add("OVA_EMG_EN", false);
    let uva = vars.add("UVA_EMG_EN", false);
    let oia = vars.add("OIA_EMG_EN", false);
    let v_limit = vars.add("V_LIMIT_HIGH", 4.2f32);
    let cells = vars.add("CELL_COUNT", 6u8);
    let pack_limit = vars.add("PACK_LIMIT", 4.2f32 * 6.0);
    let can_id = vars.add("CAN_ID", 0x120u16);
    let offset = vars.add("CURRENT_OFFSET", -12i32);
    let motors = vars.add("MOTOR_COUNT", 4u8);
    let kp = vars.add("KP", 0.85f64);
    let timeout = vars.add("TIMEOUT_MS", 500u64);

    // Pack limit follows cell limit × cell count
    let recompute = {
        let (v_limit, cells, pack_limit) = (v_limit.clone(), cells.clone(), pack_limit.clone());
        move || pack_limit.set(v_limit.get() * f32::from(cells.get()))
    };

    let mut menu = Menu::new();
    let main = menu.add(Layout::titled(
        "Board settings",
        vec![
            Label::new("Drive power", "-> drive power board"),
            Label::new("Control power", "-> control power board"),
            Label::new("Motor control", "-> motor control board"),
        ],
    ));
    let drive = menu.add(Layout::titled(
        "Drive power board",
        vec![
            Label::new("Back", "-> board settings"),
            Label::new("EX_EMG_TRG", "Automatic emergency stop triggers"),
            Label::new("EMG_RQ", "Emergency stop request").with_variable(VariableCell::bind(&emg_rq)),
            Label::new("V_LIMIT_HIGH", "Per-cell over-voltage alert")
                .with_variable(VariableCell::bind(&v_limit))
                .with_callback(recompute.clone()),
            Label::new("CELL_COUNT", "Cells in series")
                .with_variable(VariableCell::bind(&cells))
                .with_callback(recompute),
            Label::new("PACK_LIMIT", "Pack over-voltage alert (derived)")
                .with_variable(VariableCell::bind(&pack_limit)),
        ],
    ));
    let triggers = menu.add(Layout::titled(
        "Emergency stop triggers",
        vec![
            Label::new("Back", "-> drive power board"),
            Label::new("OVA_EMG_EN", "Stop on over-voltage alert").with_variable(VariableCell::bind(&ova)),
            Label::new("UVA_EMG_EN", "Stop on under-voltage alert").with_variable(VariableCell::bind(&uva)),
            Label::new("OIA_EMG_EN", "Stop on over-current alert").with_variable(VariableCell::bind(&oia)),
        ],
    ));
    let control = menu.add(Layout::titled(
        "Control power board",
        vec![
            Label::new("Back", "-> board settings"),
            Label::new("CAN_ID", "CAN bus identifier").with_variable(VariableCell::bind(&can_id)),
            Label::new("CURRENT_OFFSET", "Current sensor offset (mA)")
                .with_variable(VariableCell::bind(&offset)),
        ],
    ));
    let motor = menu.add(Layout::titled(
        "Motor control board",
        vec![
            Label::new("Back", "-> board settings"),
            Label::new("MOTOR_COUNT", "Motors attached").with_variable(VariableCell::bind(&motors)),
            Label::new("KP", "Speed loop proportional gain").with_variable(VariableCell::bind(&kp)),
            Label::new("TIMEOUT_MS", "Command timeout").with_variable(VariableCell::bind(&timeout)),
        ],
    ));

    let links = [
        (main, 0, drive),
        (main, 1, control),
        (main, 2, motor),
        (drive, 0, main),
        (drive, 1, triggers),
        (triggers, 0, drive),
        (control, 0, main),
        (motor, 0, main),
    ];
    for (from, index, to) in links {
        menu.link(from, index, to)?;
    }

    Ok(LoadedMenu {
        menu,
        start: main,
        variables: vars.0,
        debug_log_length: DEFAULT_LOG_LENGTH,
        debug_log_column: DEFAULT_LOG_COLUMN,
    })
}

// ============================================================================
// TESTS
// ============================================================================
