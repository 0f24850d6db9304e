use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Pixel;

use dash_core::{Instant, InverterCommand};
use dash_ui::layout::rect;
use dash_ui::screens::{PAGE_CONFIG, PAGE_MAIN};
use dash_ui::widgets::Flags;
use dash_ui::{
    Controller, Dashboard, HintRefresh, NativeFlow, ScreenId, Services, UiEvent, UiObject,
    WidgetId,
};

fn dashboard() -> Dashboard<NativeFlow> {
    let mut dashboard = Dashboard::new(NativeFlow::default());
    dashboard.create_screens().unwrap();
    dashboard
}

fn center_of(dashboard: &Dashboard<NativeFlow>, id: Option<WidgetId>) -> Point {
    rect(dashboard.widgets(), id.unwrap()).unwrap().center()
}

fn tap(dashboard: &mut Dashboard<NativeFlow>, point: Point) {
    dashboard.press(point).unwrap();
    dashboard.release().unwrap();
}

#[derive(Default)]
struct FakeServices {
    wifi: bool,
    wifi_fails: bool,
    scanning: bool,
    backlight: Option<bool>,
}

impl Services for FakeServices {
    type Error = &'static str;

    fn start_wifi(&mut self) -> Result<[u8; 4], Self::Error> {
        if self.wifi_fails {
            return Err("no radio");
        }
        self.wifi = true;
        Ok([192, 168, 71, 1])
    }

    fn stop_wifi(&mut self) -> Result<(), Self::Error> {
        self.wifi = false;
        Ok(())
    }

    fn start_scanning(&mut self) -> Result<bool, Self::Error> {
        Ok(!core::mem::replace(&mut self.scanning, true))
    }

    fn stop_scanning(&mut self) -> Result<bool, Self::Error> {
        Ok(core::mem::replace(&mut self.scanning, false))
    }

    fn set_backlight(&mut self, on: bool) {
        self.backlight = Some(on);
    }
}

fn drain(
    dashboard: &mut Dashboard<NativeFlow>,
    controller: &mut Controller,
    services: &mut FakeServices,
    now: Instant,
) -> Vec<UiEvent> {
    let mut handled = Vec::new();
    while let Some(event) = dashboard.poll_ui_event() {
        controller.handle(event, now, dashboard, services);
        handled.push(event);
    }
    handled
}

struct Panel {
    drawn: usize,
    refreshed: usize,
}

impl OriginDimensions for Panel {
    fn size(&self) -> Size {
        Size::new(800, 480)
    }
}

impl DrawTarget for Panel {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.drawn += pixels.into_iter().count();
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, _color: Self::Color) -> Result<(), Self::Error> {
        self.drawn += area.size.width as usize * area.size.height as usize;
        Ok(())
    }
}

impl HintRefresh for Panel {
    fn hint_refresh(&mut self) {
        self.refreshed += 1;
    }
}

#[test]
fn create_screens_shows_main() {
    let dashboard = dashboard();

    assert_eq!(dashboard.current_screen(), ScreenId::Main);
    assert_eq!(dashboard.widgets().active(), dashboard.objects().main);
    assert!(dashboard.objects().config.is_some());
    assert!(dashboard.flow().is_live(PAGE_MAIN));
    assert!(dashboard.flow().is_live(PAGE_CONFIG));
    assert!(dashboard.flow().names().is_some());
    assert_eq!(dashboard.flow().error_count(), 0);
}

#[test]
fn tick_pushes_readings_into_widgets() {
    let mut dashboard = dashboard();
    {
        let vars = dashboard.flow_mut().vars_mut();
        vars.ac_watts = 1234;
        vars.batt_soc = Some(56.7);
        vars.batt_volt = 12.5;
        vars.solar_yield = 1250;
    }
    dashboard.tick().unwrap();

    let o = *dashboard.objects();
    let w = dashboard.widgets();
    assert_eq!(w.label_text(o.ac_watts.unwrap()).unwrap(), "1234");
    assert_eq!(w.arc_value(o.ac_watts_arc.unwrap()).unwrap(), 1234);
    assert_eq!(w.label_text(o.batt_soc.unwrap()).unwrap(), "56.7");
    assert_eq!(w.label_text(o.batt_volt.unwrap()).unwrap(), "12.50");
    assert_eq!(w.label_text(o.solar_yield.unwrap()).unwrap(), "1.25 kWh");
    assert!(w.has_flag(o.soc_unknown_container.unwrap(), Flags::HIDDEN).unwrap());
    assert!(!w.has_flag(o.soc_container.unwrap(), Flags::HIDDEN).unwrap());
    assert!(w.has_flag(o.inv_error.unwrap(), Flags::HIDDEN).unwrap());

    // Programmatic updates never write back into read-only variables
    assert_eq!(dashboard.flow().error_count(), 0);
    assert_eq!(dashboard.flow().vars().ac_watts, 1234);
}

#[test]
fn unknown_soc_shows_placeholder() {
    let mut dashboard = dashboard();
    dashboard.tick().unwrap();

    let o = *dashboard.objects();
    let w = dashboard.widgets();
    assert!(!w.has_flag(o.soc_unknown_container.unwrap(), Flags::HIDDEN).unwrap());
    assert!(w.has_flag(o.soc_container.unwrap(), Flags::HIDDEN).unwrap());
}

#[test]
fn inverter_switch_requests_command() {
    let mut dashboard = dashboard();
    dashboard.tick().unwrap();
    assert!(!dashboard.flow().vars().inv_switch());

    let point = center_of(&dashboard, dashboard.objects().inv_switch);
    tap(&mut dashboard, point);

    let vars = dashboard.flow().vars();
    assert!(vars.inv_switch());
    assert_eq!(vars.inverter.pending_command(), Some(InverterCommand::On));

    // Already in sync, the next tick changes nothing
    dashboard.tick().unwrap();
    assert!(dashboard.flow().vars().inv_switch());
}

#[test]
fn slider_drag_sets_backlight_delay() {
    let mut dashboard = dashboard();
    dashboard.load_screen(ScreenId::Config).unwrap();
    dashboard.tick().unwrap();

    let slider = rect(dashboard.widgets(), dashboard.objects().backlight_delay.unwrap()).unwrap();
    dashboard.press(slider.center()).unwrap();
    dashboard
        .press_move(slider.center() + Point::new(10_000, 0))
        .unwrap();
    dashboard.release().unwrap();
    assert_eq!(dashboard.flow().vars().backlight_delay, 300);

    dashboard.tick().unwrap();
    let text = dashboard.objects().backlight_delay_text.unwrap();
    assert_eq!(dashboard.widgets().label_text(text).unwrap(), "300 s");
}

#[test]
fn deleted_screen_is_recreated_on_load() {
    let mut dashboard = dashboard();
    let old_root = dashboard.objects().main.unwrap();

    dashboard.delete_screen(ScreenId::Main.index()).unwrap();
    assert!(dashboard.objects().main.is_none());
    assert!(!dashboard.widgets().is_valid(old_root));
    assert!(!dashboard.flow().is_live(PAGE_MAIN));

    // Ticking a deleted screen is harmless
    dashboard.tick_screen(ScreenId::Main.index()).unwrap();

    dashboard.load_screen(ScreenId::Main).unwrap();
    let root = dashboard.objects().main.unwrap();
    assert_ne!(root, old_root);
    assert_eq!(dashboard.widgets().active(), Some(root));
    assert!(dashboard.widgets().callback_count(root) > 0);
    assert!(dashboard.flow().is_live(PAGE_MAIN));
}

#[test]
fn unknown_screen_ids_are_rejected() {
    let mut dashboard = dashboard();
    assert!(dashboard.create_screen_by_id(0).is_err());
    assert!(dashboard.tick_screen_by_id(3).is_err());
    assert!(dashboard.delete_screen(2).is_err());
}

#[test]
fn navigation_drives_services() {
    let now = Instant::from_ticks(0);
    let mut dashboard = dashboard();
    let mut controller = Controller::new(now);
    let mut services = FakeServices::default();

    let point = center_of(&dashboard, dashboard.objects().go_config);
    tap(&mut dashboard, point);
    let handled = drain(&mut dashboard, &mut controller, &mut services, now);
    assert_eq!(handled, [UiEvent::Pressed(UiObject::GoConfig)]);
    assert_eq!(dashboard.current_screen(), ScreenId::Config);
    assert!(controller.backlight().is_suspended());
    assert_eq!(services.backlight, Some(true));

    let point = center_of(&dashboard, dashboard.objects().wifi_btn);
    tap(&mut dashboard, point);
    drain(&mut dashboard, &mut controller, &mut services, now);
    assert!(services.wifi);
    assert_eq!(
        dashboard.flow().vars().ip_addr.as_deref(),
        Some(" vicmon.local (192.168.71.1)")
    );

    dashboard.flow_mut().vars_mut().backlight_delay = 60;
    let point = center_of(&dashboard, dashboard.objects().go_main);
    tap(&mut dashboard, point);
    drain(&mut dashboard, &mut controller, &mut services, now);
    assert_eq!(dashboard.current_screen(), ScreenId::Main);
    assert!(!services.wifi);
    assert!(services.scanning);
    assert!(!controller.backlight().is_suspended());
    assert_eq!(controller.backlight().on_duration().to_secs(), 60);
}

#[test]
fn failed_wifi_shows_message() {
    let now = Instant::from_ticks(0);
    let mut dashboard = dashboard();
    let mut controller = Controller::new(now);
    let mut services = FakeServices {
        wifi_fails: true,
        ..Default::default()
    };

    dashboard.load_screen(ScreenId::Config).unwrap();
    let point = center_of(&dashboard, dashboard.objects().wifi_btn);
    tap(&mut dashboard, point);
    drain(&mut dashboard, &mut controller, &mut services, now);

    assert_eq!(
        dashboard.flow().vars().ip_addr.as_deref(),
        Some("Failed to start wifi, \"no radio\"")
    );
}

#[test]
fn backlight_times_out_and_wakes_on_touch() {
    let start = Instant::from_ticks(0);
    let mut dashboard = dashboard();
    let mut controller = Controller::new(start);
    let mut services = FakeServices::default();

    assert_eq!(controller.poll(start + dash_core::Duration::secs(31), &mut services), None);
    assert_eq!(services.backlight, Some(false));

    // Empty area of the main screen
    let later = start + dash_core::Duration::secs(40);
    tap(&mut dashboard, Point::new(400, 470));
    let handled = drain(&mut dashboard, &mut controller, &mut services, later);
    assert_eq!(handled, [UiEvent::Pressed(UiObject::MainScreen)]);

    let event = controller.poll(later, &mut services);
    assert_eq!(event, Some(UiEvent::BacklightOn));
    assert_eq!(services.backlight, Some(true));

    controller.handle(event.unwrap(), later, &mut dashboard, &mut services);
    assert!(services.scanning);
}

#[test]
fn draws_only_when_changed() {
    let mut dashboard = dashboard();
    let mut panel = Panel {
        drawn: 0,
        refreshed: 0,
    };

    assert!(dashboard.draw(&mut panel).unwrap());
    assert!(panel.drawn >= 800 * 480);
    assert_eq!(panel.refreshed, 1);

    // Nothing changed
    dashboard.tick().unwrap();
    assert!(!dashboard.draw(&mut panel).unwrap());

    dashboard.flow_mut().vars_mut().ac_watts = 500;
    dashboard.tick().unwrap();
    assert!(dashboard.draw(&mut panel).unwrap());
    assert_eq!(panel.refreshed, 2);
}
