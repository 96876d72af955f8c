use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use tessera_engine::logging::{LoggingConfig, init_logging};
use tessera_engine::scene::DrawCmd;
use tessera_ui::prelude::*;

/// Fonts tried when `TESSERA_FONT` is unset.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

const VIEWPORT: Viewport = Viewport::new(1024.0, 768.0);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    log::info!("tessera studio {}: headless widget tree", env!("CARGO_PKG_VERSION"));

    let mut ui = UiScene::new(VIEWPORT);
    load_fonts(&mut ui)?;

    let clicks = Rc::new(Cell::new(0u32));
    let studio = build(&mut ui, clicks.clone());
    ui.layout();
    ui.tree.center(studio.settings);
    log_geometry(&ui, "settings", studio.settings);
    log_geometry(&ui, "inventory", studio.inventory);
    log_geometry(&ui, "palette", studio.palette);
    log_geometry(&ui, "journal", studio.journal);

    let mut input = Input::new();
    run(&mut ui, &mut input, &studio)?;

    log::info!("mute clicked {} time(s)", clicks.get());
    if let Some(name) = ui.tree.behavior::<TextBox>(studio.name) {
        log::info!("player name {:?}", name.value());
    }
    if let Some(scroll) = ui.tree.behavior::<VScrollPanel>(studio.scroll) {
        log::info!("journal scrolled to {:.2}", scroll.scroll());
    }
    log_geometry(&ui, "settings", studio.settings);
    Ok(())
}

/// Registers `"sans"` and `"sans-bold"`. Without a font file text is measured
/// with fallback metrics.
fn load_fonts(ui: &mut UiScene) -> Result<()> {
    let bytes = match std::env::var("TESSERA_FONT") {
        Ok(path) => Some(std::fs::read(&path).with_context(|| format!("reading TESSERA_FONT {path}"))?),
        Err(_) => SYSTEM_FONTS.iter().find_map(|p| std::fs::read(p).ok()),
    };

    let Some(bytes) = bytes else {
        log::warn!("no font found, measuring text with fallback metrics");
        return Ok(());
    };
    for name in ["sans", "sans-bold"] {
        ui.load_named_font(name, &bytes).with_context(|| format!("loading font {name:?}"))?;
    }
    Ok(())
}

struct Studio {
    settings: WidgetId,
    inventory: WidgetId,
    palette: WidgetId,
    journal: WidgetId,
    mute: WidgetId,
    name: WidgetId,
    scroll: WidgetId,
}

fn build(ui: &mut UiScene, clicks: Rc<Cell<u32>>) -> Studio {
    let tree = &mut ui.tree;
    let root = tree.root();

    // Settings: captioned groups.
    let settings = tree.insert(Some(root), Dialog::new("Settings"));
    tree.set_layout(settings, GroupLayout::default());
    tree.insert(Some(settings), Label::new("Audio"));
    let mute = tree.insert(Some(settings), Button::new("Mute").on_click(move || clicks.set(clicks.get() + 1)));
    tree.insert(Some(settings), Button::new("Volume"));
    tree.insert(Some(settings), Label::new("Video"));
    tree.insert(Some(settings), CheckBox::new("Fullscreen").on_toggle(|on| log::info!("fullscreen {on}")));
    tree.insert(Some(settings), Label::new("Player"));
    let name = tree.insert(
        Some(settings),
        TextBox::new("Ranger").placeholder("name").default_value("Ranger").on_commit(|v| !v.trim().is_empty()),
    );

    // Inventory: three slots per row.
    let inventory = tree.insert(Some(root), Dialog::new("Inventory"));
    tree.set_layout(inventory, GridLayout::new(Orientation::Horizontal, 3, Alignment::Fill, 10.0, 4.0));
    for slot in ["Sword", "Shield", "Potion", "Map", "Key"] {
        tree.insert(Some(inventory), Button::new(slot));
    }
    tree.core_mut(inventory).set_position(Vec2::new(40.0, 40.0));

    // Palette: a header spanning two columns over a stretched swatch area.
    let palette = tree.insert(Some(root), Dialog::new("Palette"));
    let title = tree.insert(Some(palette), Label::new("Colors"));
    let swatches = tree.insert(Some(palette), Panel::new().background(Color::from_srgb_u8(90, 40, 40, 255)));
    tree.core_mut(swatches).set_fixed_size(Vec2::new(0.0, 60.0));
    let pick = tree.insert(Some(palette), Button::new("Pick"));
    let mut grid = AdvancedGridLayout::new(vec![80.0, 0.0], vec![0.0, 8.0, 0.0, 8.0, 0.0], 10.0)
        .with_anchor(title, Anchor::span(0, 0, 2, 1))
        .with_anchor(swatches, Anchor::span(0, 2, 2, 1))
        .with_anchor(pick, Anchor::new(1, 4).with_alignment(Alignment::Maximum, Alignment::Fill));
    grid.set_col_stretch(1, 1.0);
    tree.set_layout(palette, grid);
    tree.core_mut(palette).set_position(Vec2::new(700.0, 60.0));

    // Journal: a scrolled list taller than the dialog.
    let journal = tree.insert(Some(root), Dialog::new("Journal"));
    tree.set_layout(journal, BoxLayout::new(Orientation::Vertical, Alignment::Fill, 10.0, 0.0));
    let scroll = tree.insert(Some(journal), VScrollPanel::new());
    tree.core_mut(scroll).set_fixed_size(Vec2::new(220.0, 120.0));
    let entries = tree.insert(Some(scroll), Panel::new());
    tree.set_layout(entries, BoxLayout::new(Orientation::Vertical, Alignment::Minimum, 4.0, 6.0));
    for day in 1..=12 {
        tree.insert(Some(entries), Label::new(format!("Day {day}: nothing to report")));
    }
    tree.core_mut(journal).set_position(Vec2::new(60.0, 420.0));

    Studio { settings, inventory, palette, journal, mute, name, scroll }
}

/// Drives synthetic frames: drag the settings dialog by its title, click its
/// mute button, rename the player and scroll the journal.
fn run(ui: &mut UiScene, input: &mut Input, studio: &Studio) -> Result<()> {
    let grab = ui.tree.abs_position(studio.settings) + Vec2::new(20.0, 10.0);
    step(ui, input, grab, Some(ButtonState::Pressed));
    if !input.is_selected(studio.settings) {
        anyhow::bail!("settings dialog did not grab the selection");
    }

    for delta in [Vec2::new(30.0, 0.0), Vec2::new(0.0, 25.0), Vec2::new(-10.0, -5.0)] {
        let to = input.mouse_pos() + delta;
        step(ui, input, to, Some(ButtonState::Held));
    }
    let at = input.mouse_pos();
    step(ui, input, at, Some(ButtonState::Released));
    log::info!("drag finished, selection {:?}", input.selection());

    let tree = &ui.tree;
    let center = tree.abs_position(studio.mute) + tree.core(studio.mute).size() / 2.0;
    step(ui, input, center, Some(ButtonState::Pressed));
    step(ui, input, center, Some(ButtonState::Released));
    step(ui, input, center, None);

    let tree = &ui.tree;
    let field = tree.abs_position(studio.name) + tree.core(studio.name).size() / 2.0;
    step(ui, input, field, Some(ButtonState::Pressed));
    step(ui, input, field, Some(ButtonState::Released));
    if ui.tree.focused() != Some(studio.name) {
        anyhow::bail!("name field did not take focus");
    }
    keyboard(ui, input, |i| i.press_key(Key::End));
    keyboard(ui, input, |i| {
        i.release_key(Key::End);
        i.push_text("-2");
    });
    keyboard(ui, input, |i| i.press_key(Key::Enter));
    keyboard(ui, input, |i| i.release_key(Key::Enter));

    let list = ui.tree.abs_position(studio.scroll) + Vec2::new(40.0, 40.0);
    step(ui, input, list, None);
    keyboard(ui, input, |i| i.scroll(Vec2::new(0.0, -60.0)));
    Ok(())
}

/// One frame of keyboard or wheel input at the current mouse position.
fn keyboard(ui: &mut UiScene, input: &mut Input, feed: impl FnOnce(&mut Input)) {
    input.end_frame();
    feed(input);
    let list = ui.frame(input, VIEWPORT);
    log::debug!("input frame: {} draw commands", list.len());
}

fn step(ui: &mut UiScene, input: &mut Input, mouse: Vec2, left: Option<ButtonState>) {
    input.end_frame();
    input.move_mouse(mouse);
    if let Some(state) = left {
        input.set_button(MouseButton::Left, state);
    }

    let list = ui.frame(input, VIEWPORT);
    let texts = list.items().iter().filter(|i| matches!(i.cmd, DrawCmd::Text(_))).count();
    log::debug!("frame at {mouse:?}: {} draw commands, {texts} text runs", list.len());
}

fn log_geometry(ui: &UiScene, name: &str, id: WidgetId) {
    let core = ui.tree.core(id);
    log::info!("{name}: pos {:?} size {:?}", core.position(), core.size());
    for &child in core.children() {
        let c = ui.tree.core(child);
        log::debug!("  {child:?}: pos {:?} size {:?}", c.position(), c.size());
    }
}
