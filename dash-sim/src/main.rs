use std::convert::Infallible;
use std::fmt::Write;
use std::time::{Duration as StdDuration, Instant as StdInstant};

use dash_core::form::handle_config_post;
use dash_core::{
    AlarmReason, BatteryMonitorState, DashboardVars, DeviceState, Devices, ErrorState, Instant,
    MemoryStorage, Mode, SolarChargerState, VeBusState,
};
use dash_ui::panic::draw_fault_screen;
use dash_ui::{Controller, Dashboard, HintRefresh, NativeFlow, Services};
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::Pixel;
use embedded_graphics_simulator::sdl2::{Keycode, MouseButton};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use log::{error, info};

const DEMO_FORM: &[u8] = br#"{
    "inv_mac": "c0:3b:98:07:7e:51", "inv_key": "5c3a19dbbd1ac46a3fdb3e3c1bd5ab47", "inv_pin": 123456,
    "mppt_mac": "e8:8c:1d:2c:58:a1", "mppt_key": "0f6ec3a3c1d4dcd0a6bce7a5f2a5e5a3",
    "bmv_mac": "", "bmv_key": ""
}"#;

/// Simulator window contents; counts the frames the renderer finished.
struct SimPanel {
    display: SimulatorDisplay<Rgb565>,
    frames: u32,
}

impl OriginDimensions for SimPanel {
    fn size(&self) -> Size {
        self.display.size()
    }
}

impl DrawTarget for SimPanel {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.display.draw_iter(pixels)
    }
}

impl HintRefresh for SimPanel {
    fn hint_refresh(&mut self) {
        self.frames += 1;
    }
}

/// Radios and backlight of the real board, as log lines.
#[derive(Default)]
struct SimServices {
    wifi: bool,
    scanning: bool,
    backlight: bool,
}

impl Services for SimServices {
    type Error = Infallible;

    fn start_wifi(&mut self) -> Result<[u8; 4], Self::Error> {
        info!("Access point up");
        self.wifi = true;
        Ok([192, 168, 71, 1])
    }

    fn stop_wifi(&mut self) -> Result<(), Self::Error> {
        if self.wifi {
            info!("Access point down");
        }
        self.wifi = false;
        Ok(())
    }

    fn start_scanning(&mut self) -> Result<bool, Self::Error> {
        Ok(!std::mem::replace(&mut self.scanning, true))
    }

    fn stop_scanning(&mut self) -> Result<bool, Self::Error> {
        Ok(std::mem::replace(&mut self.scanning, false))
    }

    fn set_backlight(&mut self, on: bool) {
        info!("Backlight {}", if on { "on" } else { "off" });
        self.backlight = on;
    }
}

/// One round of advertisements, varying with `t` seconds.
fn readings(t: f32, inverter_on: bool, faults: bool) -> [DeviceState; 3] {
    let sun = (t / 20.0).sin().max(0.0);
    let load = if inverter_on { 350.0 + 250.0 * (t / 7.0).sin() } else { 0.0 };

    [
        DeviceState::SolarCharger(SolarChargerState {
            mode: if sun > 0.0 { Mode::Bulk } else { Mode::Off },
            error_state: if faults {
                ErrorState::InputVoltageTooHigh
            } else {
                ErrorState::NoError
            },
            battery_voltage_v: Some(13.1),
            battery_current_a: Some(sun * 20.0),
            yield_today_kwh: Some(t / 600.0),
            pv_power_w: Some(sun * 380.0),
        }),
        DeviceState::VeBus(VeBusState {
            mode: if inverter_on { Mode::Inverting } else { Mode::Off },
            error: ErrorState::NoError,
            ac_out_power_w: Some(load),
            battery_temperature_c: Some(21.0),
        }),
        DeviceState::BatteryMonitor(BatteryMonitorState {
            state_of_charge_pct: (t > 5.0).then(|| 60.0 + 30.0 * (t / 40.0).sin()),
            battery_voltage_v: Some(12.8 + sun),
            battery_current_a: Some(sun * 20.0 - load / 12.8),
            alarm_reason: if faults {
                AlarmReason(AlarmReason::LOW_SOC)
            } else {
                AlarmReason(0)
            },
        }),
    ]
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start = StdInstant::now();
    let now = || Instant::from_ticks(start.elapsed().as_millis() as u64);

    let mut vars = DashboardVars::default();
    let mut devices = Devices::new();
    devices.load(MemoryStorage::new(), &mut vars);
    match handle_config_post(DEMO_FORM, &mut devices, &mut vars) {
        Ok(resp) => info!("Demo devices: {resp}"),
        Err(e) => error!("Demo devices: {e}"),
    }

    let mut panel = SimPanel {
        display: SimulatorDisplay::new(Size::new(800, 480)),
        frames: 0,
    };
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("vicmon", &output_settings);

    let mut dashboard = Dashboard::new(NativeFlow::new(vars));
    if let Err(e) = dashboard.create_screens() {
        let mut message = String::new();
        let _ = write!(message, "{e}");
        draw_fault_screen(&mut panel, &message);
        loop {
            window.update(&panel.display);
            if window.events().any(|e| matches!(e, SimulatorEvent::Quit)) {
                return;
            }
            tokio::time::sleep(StdDuration::from_millis(50)).await;
        }
    }

    let mut controller = Controller::new(now());
    let mut services = SimServices {
        backlight: true,
        ..Default::default()
    };
    let _ = services.start_scanning();

    let mut ticker = tokio::time::interval(StdDuration::from_millis(20));
    let mut last_reading = StdInstant::now();
    let mut faults = false;
    let mut mouse_down = false;

    'outer: loop {
        ticker.tick().await;
        let now = now();

        let vars = dashboard.flow_mut().vars_mut();
        if let Some(command) = vars.inverter.pending_command() {
            info!("Writing {:02x?}", command.frame());
            vars.inverter.command_written();
            vars.inverter.disconnected(now);
        }
        if services.scanning && last_reading.elapsed() >= StdDuration::from_secs(1) {
            last_reading = StdInstant::now();
            let t = start.elapsed().as_secs_f32();
            for state in readings(t, vars.inverter.is_on(), faults) {
                vars.apply_device_state(&state, now);
            }
        }

        if let Some(event) = controller.poll(now, &mut services) {
            controller.handle(event, now, &mut dashboard, &mut services);
        }
        if let Err(e) = dashboard.tick() {
            error!("Tick failed, {e}");
        }
        while let Some(event) = dashboard.poll_ui_event() {
            controller.handle(event, now, &mut dashboard, &mut services);
        }

        if services.backlight {
            let _ = dashboard.draw(&mut panel);
        }
        window.update(&panel.display);

        for event in window.events() {
            let result = match event {
                SimulatorEvent::Quit => break 'outer,
                SimulatorEvent::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    point,
                } => {
                    mouse_down = true;
                    dashboard.press(point).map(|_| ())
                }
                SimulatorEvent::MouseMove { point } if mouse_down => dashboard.press_move(point),
                SimulatorEvent::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } => {
                    mouse_down = false;
                    dashboard.release()
                }
                SimulatorEvent::KeyUp {
                    keycode: Keycode::F,
                    ..
                } => {
                    faults = !faults;
                    info!("Faults {}", if faults { "on" } else { "off" });
                    Ok(())
                }
                _ => Ok(()),
            };
            if let Err(e) = result {
                error!("Input failed, {e}");
            }
        }
    }

    info!("Rendered {} frames", panel.frames);
}
