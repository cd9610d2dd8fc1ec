/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::debug;
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::{Admission, ElevatorFSM};
use crate::shared::ButtonId;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    /// Edges are inclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// Screen-space rectangles of the cabin panel, y grows upwards.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PanelLayout {
    buttons: Vec<(ButtonId, Rect)>,
}

/**
 * The cabin button panel.
 *
 * Floor lights are switched on when a floor button admits a call to another
 * floor and switched off when the cabin arrives there. The stop latch and the
 * ventilation light belong to the panel, not to the elevator.
 *
 * # Fields
 * - `layout`:       Hit-test rectangles.
 * - `floor_lights`: Pressed state of each floor button.
 * - `stop_latched`: Stop button is latched in.
 * - `vent_light`:   Ventilation button is lit.
 * - `arrival_rx`:   Arrivals published by the elevator.
 */
pub struct ButtonPanel {
    layout: PanelLayout,
    floor_lights: Vec<bool>,
    stop_latched: bool,
    vent_light: bool,
    arrival_rx: cbc::Receiver<u8>,
}

/***************************************/
/*            Panel layout             */
/***************************************/
const BUTTON_WIDTH: f64 = 160.0;
const BUTTON_HEIGHT: f64 = 80.0;
const ROW_SPACING: f64 = BUTTON_HEIGHT + 15.0;
const COLUMN_OFFSET: f64 = 90.0;
const TOP_MARGIN: f64 = 160.0;

impl PanelLayout {
    /**
     * Two columns of floor buttons, two floors per row from the lowest floor up,
     * followed by OPEN/CLOSE and STOP/VENT rows. The panel is centred in the
     * left half of the screen.
     */
    pub fn new(n_floors: u8, screen_width: f64, screen_height: f64) -> PanelLayout {
        let panel_center_x = screen_width / 4.0;
        let left_x0 = panel_center_x - COLUMN_OFFSET - BUTTON_WIDTH * 0.5;
        let right_x0 = panel_center_x + COLUMN_OFFSET - BUTTON_WIDTH * 0.5;
        let start_y = screen_height - TOP_MARGIN;

        let cell = |column: usize, row_offset: f64| {
            let x0 = if column == 0 { left_x0 } else { right_x0 };
            let y1 = start_y - row_offset * ROW_SPACING;
            Rect {
                x0,
                y0: y1 - BUTTON_HEIGHT,
                x1: x0 + BUTTON_WIDTH,
                y1,
            }
        };

        let mut buttons = Vec::with_capacity(n_floors as usize + 4);
        for floor in 0..n_floors {
            let row = (floor / 2) as f64;
            buttons.push((ButtonId::Floor(floor), cell(floor as usize % 2, row)));
        }

        let floor_rows = ((n_floors as f64) / 2.0).ceil();
        let control_row = floor_rows + 0.5;
        buttons.push((ButtonId::Open, cell(0, control_row)));
        buttons.push((ButtonId::Close, cell(1, control_row)));
        buttons.push((ButtonId::Stop, cell(0, control_row + 1.0)));
        buttons.push((ButtonId::Ventilation, cell(1, control_row + 1.0)));

        PanelLayout { buttons }
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<ButtonId> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(id, _)| *id)
    }

    pub fn buttons(&self) -> &[(ButtonId, Rect)] {
        &self.buttons
    }
}

/***************************************/
/*             Public API              */
/***************************************/
impl ButtonPanel {
    pub fn new(layout: PanelLayout, elevator: &mut ElevatorFSM) -> ButtonPanel {
        ButtonPanel {
            layout,
            floor_lights: vec![false; elevator.n_floors() as usize],
            stop_latched: false,
            vent_light: elevator.ventilation_on(),
            arrival_rx: elevator.subscribe_arrivals(),
        }
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Presses whatever button lies under `(x, y)`.
    pub fn click(&mut self, x: f64, y: f64, inside: bool, elevator: &mut ElevatorFSM) -> Option<ButtonId> {
        let button = self.layout.hit_test(x, y)?;
        self.press(button, inside, elevator);
        Some(button)
    }

    /// Returns whether the press reached the elevator. The panel is only usable from inside.
    pub fn press(&mut self, button: ButtonId, inside: bool, elevator: &mut ElevatorFSM) -> bool {
        if !inside {
            debug!("Ignoring {:?}, passenger is not in the cabin", button);
            return false;
        }

        match button {
            ButtonId::Floor(floor) => {
                let floor = floor.min(elevator.n_floors() - 1);
                match elevator.dispatch(floor) {
                    Admission::SetTarget | Admission::Enqueue | Admission::Duplicate => {
                        self.floor_lights[floor as usize] = true;
                    }
                    _ => {}
                }
                true
            }
            ButtonId::Open => elevator.press_open(),
            ButtonId::Close => elevator.press_close(),
            ButtonId::Stop => {
                let toggled = elevator.toggle_stop();
                if toggled {
                    self.stop_latched = !self.stop_latched;
                }
                toggled
            }
            ButtonId::Ventilation => {
                self.vent_light = elevator.toggle_ventilation();
                true
            }
        }
    }

    /// Clears lights of floors the cabin arrived at since the last refresh.
    pub fn refresh(&mut self, elevator: &ElevatorFSM) {
        for floor in self.arrival_rx.try_iter() {
            if let Some(light) = self.floor_lights.get_mut(floor as usize) {
                *light = false;
            }
        }
        self.vent_light = elevator.ventilation_on();
    }

    pub fn is_lit(&self, button: ButtonId) -> bool {
        match button {
            ButtonId::Floor(floor) => self.floor_lights.get(floor as usize).copied().unwrap_or(false),
            ButtonId::Stop => self.stop_latched,
            ButtonId::Ventilation => self.vent_light,
            ButtonId::Open | ButtonId::Close => false,
        }
    }

    pub fn lit_buttons(&self) -> Vec<ButtonId> {
        self.layout
            .buttons
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| self.is_lit(*id))
            .collect()
    }
}
