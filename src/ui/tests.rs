use std::thread;
use std::time::{Duration, Instant};

use fetch_select_api::{FetchError, FnAdapter, OptionKey, Page, PageRequest};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::text::Line;

use super::listeners::ListenerChange;
use super::{Anchor, App, SelectOutcome, SelectUi};
use crate::select::{Placement, SelectOptions};
use crate::sources::StaticSource;

const NAMES: &[&str] = &[
	"Acme", "Acorn", "Beta", "Bolt", "Cobalt", "Delta", "Echo", "Foxtrot", "Gamma", "Helix", "Ion",
	"Jade",
];

type Brand = &'static str;

fn options(multiple: bool) -> SelectOptions {
	SelectOptions {
		multiple,
		debounce: Duration::ZERO,
		page_size: 5,
		clearable: true,
		..SelectOptions::default()
	}
}

fn ui(options: SelectOptions) -> SelectUi<Brand> {
	let adapter = FnAdapter::new(
		|name: &Brand| OptionKey::from(*name),
		|name: &Brand| Line::from(*name),
	);
	let source = StaticSource::new(NAMES.to_vec(), |name: &Brand, term: &str| {
		name.to_lowercase().contains(&term.to_lowercase())
	});
	SelectUi::new(adapter, source)
		.with_options(options)
		.with_field_name("brand_id")
		.with_title("Brand")
}

fn app(multiple: bool) -> App<Brand> {
	ui(options(multiple)).build()
}

/// Tick until the worker has answered everything that was issued.
fn settle(app: &mut App<Brand>) {
	for _ in 0..400 {
		app.tick(Instant::now());
		if !app.select.is_loading() && app.fetch.in_flight() == 0 {
			return;
		}
		thread::sleep(Duration::from_millis(5));
	}
	panic!("fetches did not settle");
}

fn draw(app: &mut App<Brand>) -> String {
	let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
	terminal.draw(|frame| app.draw(frame)).unwrap();
	terminal.backend().to_string()
}

fn press(app: &mut App<Brand>, code: KeyCode) -> Option<SelectOutcome<Brand>> {
	app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), Instant::now())
}

fn click(app: &mut App<Brand>, column: u16, row: u16) {
	let mouse = MouseEvent {
		kind: MouseEventKind::Down(MouseButton::Left),
		column,
		row,
		modifiers: KeyModifiers::NONE,
	};
	app.handle_mouse(mouse, Instant::now());
}

fn open_and_load(app: &mut App<Brand>) {
	draw(app);
	press(app, KeyCode::Down);
	settle(app);
	draw(app);
}

#[test]
fn closed_control_shows_title_and_placeholder() {
	let mut app = app(false);
	let view = draw(&mut app);
	assert!(view.contains("Brand"));
	assert!(view.contains("Select..."));
	assert!(!app.select.is_open());
}

#[test]
fn opening_lists_the_first_page() {
	let mut app = app(false);
	open_and_load(&mut app);
	let view = draw(&mut app);
	assert!(app.select.is_open());
	assert!(view.contains("Acme"));
	assert!(view.contains("Cobalt"));
	assert!(!view.contains("Delta"));
}

#[test]
fn typing_filters_and_reports_empty_results() {
	let mut app = app(false);
	draw(&mut app);
	for ch in "zzz".chars() {
		press(&mut app, KeyCode::Char(ch));
	}
	assert!(app.select.is_open());
	assert_eq!(app.select.query(), "zzz");
	settle(&mut app);
	assert!(draw(&mut app).contains("No options found"));
}

#[test]
fn enter_selects_the_highlighted_option() {
	let mut app = app(false);
	open_and_load(&mut app);
	press(&mut app, KeyCode::Down);
	assert_eq!(press(&mut app, KeyCode::Enter), None);

	assert!(!app.select.is_open());
	assert_eq!(app.field_value().as_deref(), Some("Acme"));
	assert!(draw(&mut app).contains("Acme"));
}

#[test]
fn required_submit_reports_an_error_until_something_is_selected() {
	let mut app = ui(options(false)).with_required(true).build();
	draw(&mut app);
	assert_eq!(press(&mut app, KeyCode::Enter), None);
	assert!(draw(&mut app).contains("This field is required"));

	press(&mut app, KeyCode::Down);
	settle(&mut app);
	draw(&mut app);
	press(&mut app, KeyCode::Down);
	press(&mut app, KeyCode::Enter);
	assert!(!draw(&mut app).contains("This field is required"));

	let outcome = press(&mut app, KeyCode::Enter).expect("submitted");
	assert!(outcome.accepted);
	assert_eq!(outcome.value, "Acme");
	assert_eq!(outcome.selection, vec!["Acme"]);
}

#[test]
fn escape_closes_before_it_cancels() {
	let mut app = app(false);
	open_and_load(&mut app);
	assert_eq!(press(&mut app, KeyCode::Esc), None);
	assert!(!app.select.is_open());
	assert!(app.select.is_focused());

	let outcome = press(&mut app, KeyCode::Esc).expect("cancelled");
	assert!(!outcome.accepted);
}

#[test]
fn multi_select_renders_chips_and_backspace_removes_the_last() {
	let mut app = app(true);
	open_and_load(&mut app);
	press(&mut app, KeyCode::Down);
	press(&mut app, KeyCode::Enter);
	press(&mut app, KeyCode::Down);
	press(&mut app, KeyCode::Enter);

	assert!(app.select.is_open());
	assert_eq!(app.field_value().as_deref(), Some("Acme,Acorn"));
	let view = draw(&mut app);
	assert!(view.contains(" Acme × "));
	assert!(view.contains(" Acorn × "));

	press(&mut app, KeyCode::Backspace);
	assert_eq!(app.field_value().as_deref(), Some("Acme"));
}

#[test]
fn clicking_a_chip_removes_it() {
	let mut app = app(true);
	open_and_load(&mut app);
	press(&mut app, KeyCode::Down);
	press(&mut app, KeyCode::Enter);
	draw(&mut app);

	let (rect, key) = app.layout.chips[0].clone();
	assert_eq!(key, OptionKey::from("Acme"));
	click(&mut app, rect.x, rect.y);
	assert!(app.select.selection().is_empty());
}

#[test]
fn pointer_listeners_follow_the_dropdown() {
	let mut app = app(false);
	assert_eq!(app.listeners.reconcile(app.select.is_open()), None);
	open_and_load(&mut app);
	assert_eq!(
		app.listeners.reconcile(app.select.is_open()),
		Some(ListenerChange::Attach)
	);
	press(&mut app, KeyCode::Esc);
	assert_eq!(
		app.listeners.reconcile(app.select.is_open()),
		Some(ListenerChange::Detach)
	);
}

#[test]
fn clicking_outside_closes_without_touching_the_selection() {
	let mut app = app(true);
	open_and_load(&mut app);
	press(&mut app, KeyCode::Down);
	press(&mut app, KeyCode::Enter);
	draw(&mut app);

	click(&mut app, 20, 15);
	assert!(!app.select.is_open());
	assert!(!app.select.is_focused());
	assert_eq!(app.select.selection().len(), 1);
}

#[test]
fn clicking_a_row_selects_it() {
	let mut app = app(false);
	open_and_load(&mut app);
	let list = app.layout.list;
	click(&mut app, list.x + 3, list.y + 1);
	assert!(!app.select.is_open());
	assert_eq!(app.field_value().as_deref(), Some("Acorn"));
}

#[test]
fn dropdown_opens_upward_when_anchored_at_the_bottom() {
	let mut app = ui(options(false)).with_anchor(Anchor::Bottom).build();
	open_and_load(&mut app);
	assert_eq!(app.select.placement(), Placement::Above);
	let dropdown = app.layout.dropdown.expect("dropdown drawn");
	assert_eq!(dropdown.bottom(), app.layout.input.y);
}

#[test]
fn paging_down_at_the_end_loads_the_next_page() {
	let mut app = app(false);
	open_and_load(&mut app);
	assert_eq!(app.select.results().len(), 5);

	press(&mut app, KeyCode::PageDown);
	settle(&mut app);
	assert_eq!(app.select.page_index(), 1);
	assert_eq!(app.select.results().len(), 10);
}

#[test]
fn control_x_clears_the_selection() {
	let mut app = app(true);
	open_and_load(&mut app);
	press(&mut app, KeyCode::Down);
	press(&mut app, KeyCode::Enter);
	app.handle_key(
		KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
		Instant::now(),
	);
	assert!(app.select.selection().is_empty());
	assert_eq!(app.field_value().as_deref(), Some(""));
}

#[test]
fn a_dead_worker_stops_loading_and_fails_later_fetches() {
	let adapter = FnAdapter::new(
		|name: &Brand| OptionKey::from(*name),
		|name: &Brand| Line::from(*name),
	);
	let source = |_: &PageRequest| -> Result<Page<Brand>, FetchError> {
		panic!("backend crashed");
	};
	let mut app = SelectUi::new(adapter, source)
		.with_options(options(false))
		.build();

	press(&mut app, KeyCode::Down);
	settle(&mut app);
	assert!(!app.select.is_loading());
	assert!(app.select.results().is_empty());

	press(&mut app, KeyCode::Esc);
	press(&mut app, KeyCode::Down);
	assert!(app.select.is_open());
	settle(&mut app);
	assert!(!app.select.is_loading());
	assert_eq!(app.fetch.in_flight(), 0);
}

#[test]
fn pending_search_shows_loading_instead_of_no_options() {
	let mut app = ui(SelectOptions {
		debounce: Duration::from_secs(60),
		..options(false)
	})
	.build();
	open_and_load(&mut app);

	press(&mut app, KeyCode::Char('z'));
	app.tick(Instant::now());
	assert!(app.select.is_search_pending());
	let screen = draw(&mut app);
	assert!(screen.contains("Loading..."));
	assert!(!screen.contains("No options found"));
}
