use crate::config::Config;
use crate::fetch::{self, FetchError, ImageAsset, Source};
use crate::layout::{LayoutState, Track, EDGE_MARGIN, PLACEHOLDER_ASPECT};
use crate::loader::{Spinner, TICK_MS};
use crate::manifest::Catalog;
use crate::scroll::{DragPan, ScrollBridge, Surface, SyncWrites};
use crate::theme::{self, ThemeColors};
use crate::ticker;
use crate::visibility::VisibilityTracker;
use crate::wheel;

use iced::keyboard;
use iced::mouse::ScrollDelta;
use iced::widget::operation::scroll_to;
use iced::widget::scrollable::{AbsoluteOffset, Viewport};
use iced::widget::{column, Id};
use iced::{event, window, Element, Event, Point, Size, Subscription, Task};

pub(crate) const INITIAL_WINDOW: Size = Size::new(1280.0, 800.0);

pub(crate) fn gallery_id() -> Id {
    Id::new("folio-gallery")
}

pub(crate) fn bar_id() -> Id {
    Id::new("folio-scrollbar")
}

/// Image state of one tile.
#[derive(Debug, Clone)]
pub(crate) enum TileImage {
    Pending,
    Ready(ImageAsset),
    Failed,
}

impl TileImage {
    fn aspect(&self) -> f32 {
        match self {
            TileImage::Ready(asset) if asset.aspect() > 0.0 => asset.aspect(),
            _ => PLACEHOLDER_ASPECT,
        }
    }
}

// --- View State ---

pub(crate) struct Folio {
    pub(crate) source: Source,
    pub(crate) colors: ThemeColors,
    pub(crate) catalog: Catalog,
    pub(crate) images: Vec<TileImage>,
    /// Bumped per manifest request; late results with an older value are dropped.
    pub(crate) load_generation: u64,
    /// Bumped per applied catalog; tags image requests.
    pub(crate) catalog_generation: u64,
    pub(crate) active_title: String,
    pub(crate) hovered: Option<usize>,
    /// Tile selected from the keyboard.
    pub(crate) focused: Option<usize>,
    /// `None` while a tile is hovered or focused.
    pub(crate) tracker: Option<VisibilityTracker>,
    pub(crate) layout: LayoutState,
    pub(crate) track: Track,
    pub(crate) bridge: ScrollBridge,
    pub(crate) drag: Option<DragPan>,
    /// Last pointer position inside the gallery, relative to its top-left corner.
    pub(crate) pointer: Option<Point>,
    pub(crate) modifiers: keyboard::Modifiers,
    pub(crate) spinner: Spinner,
}

#[derive(Debug, Clone)]
pub(crate) enum Message {
    ManifestLoaded(u64, Result<Catalog, FetchError>),
    ImageLoaded(u64, usize, Result<ImageAsset, FetchError>),
    Reload,
    WindowResized(Size),
    HeaderResized(Size),
    ModifiersChanged(keyboard::Modifiers),
    GalleryScrolled(Viewport),
    BarScrolled(Viewport),
    Wheel(ScrollDelta),
    PointerMoved(Point),
    PointerPressed,
    PointerReleased,
    PointerLeft,
    FocusNext,
    FocusPrevious,
    Blur,
    Activate,
    OpenLink(String),
    Tick,
}

pub(crate) fn run(config: Config) -> iced::Result {
    log::info!(
        "folio v{} ({}) starting, source {}",
        env!("FOLIO_VERSION"),
        env!("FOLIO_COMMIT"),
        config.source
    );

    iced::application(move || Folio::new(config.clone()), Folio::update, Folio::view)
        .title(Folio::title)
        .style(Folio::style)
        .subscription(Folio::subscription)
        .window_size(INITIAL_WINDOW)
        .run()
}

impl Folio {
    pub(crate) fn new(config: Config) -> (Self, Task<Message>) {
        let catalog = Catalog::fallback();
        let count = catalog.projects().len();
        let mut folio = Self {
            source: config.source,
            colors: theme::resolve(config.theme),
            active_title: catalog.meta.placeholder().to_string(),
            catalog,
            images: vec![TileImage::Pending; count],
            load_generation: 0,
            catalog_generation: 0,
            hovered: None,
            focused: None,
            tracker: Some(VisibilityTracker::observe(count)),
            layout: LayoutState::new(INITIAL_WINDOW),
            track: Track::default(),
            bridge: ScrollBridge::default(),
            drag: None,
            pointer: None,
            modifiers: keyboard::Modifiers::default(),
            spinner: Spinner::default(),
        };
        let writes = folio.relayout();
        let task = Task::batch([
            Self::sync_task(writes),
            folio.load_images(),
            folio.load_manifest(),
        ]);
        (folio, task)
    }

    fn title(&self) -> String {
        format!("{} · {}", self.catalog.meta.title_lines[0], self.displayed_title())
    }

    /// Header text for the active project; never empty.
    pub(crate) fn displayed_title(&self) -> &str {
        if self.active_title.is_empty() {
            self.catalog.meta.placeholder()
        } else {
            &self.active_title
        }
    }

    fn load_manifest(&mut self) -> Task<Message> {
        self.load_generation += 1;
        let generation = self.load_generation;
        let source = self.source.clone();
        Task::perform(fetch::load_manifest(source), move |result| {
            Message::ManifestLoaded(generation, result)
        })
    }

    fn load_images(&self) -> Task<Message> {
        let generation = self.catalog_generation;
        Task::batch(self.catalog.projects().iter().enumerate().map(|(i, project)| {
            let source = self.source.clone();
            Task::perform(fetch::load_image(source, project.image.clone()), move |result| {
                Message::ImageLoaded(generation, i, result)
            })
        }))
    }

    fn apply_catalog(&mut self, catalog: Catalog) -> Task<Message> {
        log::info!(
            "manifest loaded: {} project(s), {} link(s)",
            catalog.projects().len(),
            catalog.meta.links.len()
        );
        let count = catalog.projects().len();
        self.catalog = catalog;
        self.catalog_generation += 1;
        self.images = vec![TileImage::Pending; count];
        self.hovered = None;
        self.focused = None;
        self.drag = None;
        self.tracker = Some(VisibilityTracker::observe(count));

        let mut writes = self.bridge.scroll_to(0.0);
        let resized = self.relayout();
        writes.gallery = resized.gallery.or(writes.gallery);
        writes.bar = resized.bar.or(writes.bar);

        self.active_title = self.catalog.first_title().to_string();
        self.layout.recompute();

        Task::batch([Self::sync_task(writes), self.load_images()])
    }

    /// Re-measure the track and push the new extent into the bridge.
    fn relayout(&mut self) -> SyncWrites {
        self.track = Track::measure(
            self.images.iter().map(TileImage::aspect),
            self.layout.image_height(),
        );
        let writes = self
            .bridge
            .set_extent(self.track.content_width, self.layout.viewport.width);
        self.refresh_visibility();
        writes
    }

    fn refresh_visibility(&mut self) {
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        let best = tracker.notify(
            &self.track.tiles,
            self.bridge.offset(),
            self.bridge.viewport_width(),
        );
        if let Some(index) = best {
            self.set_active(index);
        }
    }

    fn set_active(&mut self, index: usize) {
        let Some(project) = self.catalog.projects().get(index) else {
            return;
        };
        if self.active_title != project.title {
            self.active_title = project.title.clone();
            self.layout.recompute();
        }
    }

    /// Recompute the hovered tile from the last pointer position.
    fn update_hover(&mut self) {
        let hit = self
            .pointer
            .and_then(|p| self.track.hit(p.x + self.bridge.offset(), p.y));
        if hit == self.hovered {
            return;
        }
        self.hovered = hit;
        self.engage(hit);
    }

    /// Hover or focus moved to `latest`. While any tile is engaged the tracker
    /// stays unsubscribed; once none is, it is rebuilt and reports afresh.
    fn engage(&mut self, latest: Option<usize>) {
        match latest.or(self.hovered).or(self.focused) {
            Some(index) => {
                self.tracker = None;
                self.set_active(index);
            }
            None => {
                if self.tracker.is_none() {
                    self.tracker =
                        Some(VisibilityTracker::observe(self.catalog.projects().len()));
                }
                self.refresh_visibility();
            }
        }
    }

    /// Move keyboard focus to `index` and scroll its tile into view.
    fn focus(&mut self, index: Option<usize>) -> Task<Message> {
        self.focused = index;
        let writes = match index.and_then(|i| self.track.tiles.get(i)) {
            Some(tile) => self.bridge.reveal(tile.x, tile.end(), EDGE_MARGIN),
            None => SyncWrites::default(),
        };
        self.engage(index);
        self.after_scroll(writes)
    }

    fn project_id(&self, index: usize) -> &str {
        self.catalog
            .projects()
            .get(index)
            .map_or("?", |p| p.id.as_str())
    }

    fn focused_href(&self) -> Option<String> {
        self.focused
            .and_then(|i| self.catalog.projects().get(i))
            .and_then(|p| p.href.clone())
    }

    fn sync_task(writes: SyncWrites) -> Task<Message> {
        if writes.is_empty() {
            return Task::none();
        }
        Task::batch(writes.iter().map(|(surface, x)| {
            let id = match surface {
                Surface::Gallery => gallery_id(),
                Surface::Bar => bar_id(),
            };
            scroll_to::<Message>(id, AbsoluteOffset { x, y: 0.0 })
        }))
    }

    /// Offset changed: follow up with visibility, hover, and surface writes.
    fn after_scroll(&mut self, writes: SyncWrites) -> Task<Message> {
        self.refresh_visibility();
        self.update_hover();
        Self::sync_task(writes)
    }

    fn surface_scrolled(&mut self, surface: Surface, x: f32) -> Task<Message> {
        let writes = self.bridge.surface_scrolled(surface, x);
        if !writes.is_empty() {
            log::trace!(
                "mirror #{}: {surface:?} at {x:.1}",
                self.bridge.mirror_writes()
            );
        }
        self.after_scroll(writes)
    }

    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ManifestLoaded(generation, result) => {
                if generation != self.load_generation {
                    log::debug!("discarding stale manifest result #{generation}");
                    return Task::none();
                }
                match result {
                    Ok(catalog) => self.apply_catalog(catalog),
                    Err(e) => {
                        log::warn!(
                            "manifest unavailable ({e}); keeping {} project(s)",
                            self.catalog.projects().len()
                        );
                        Task::none()
                    }
                }
            }
            Message::ImageLoaded(generation, index, result) => {
                if generation != self.catalog_generation || index >= self.images.len() {
                    return Task::none();
                }
                self.images[index] = match result {
                    Ok(asset) => {
                        log::debug!(
                            "image for {}: {}x{}",
                            self.project_id(index),
                            asset.width,
                            asset.height
                        );
                        TileImage::Ready(asset)
                    }
                    Err(e) => {
                        log::debug!("image for {} unavailable: {e}", self.project_id(index));
                        TileImage::Failed
                    }
                };
                let writes = self.relayout();
                self.after_scroll(writes)
            }
            Message::Reload => {
                log::info!("reloading manifest from {}", self.source);
                self.load_manifest()
            }
            Message::WindowResized(size) => {
                self.layout.resize(size);
                let writes = self.relayout();
                self.after_scroll(writes)
            }
            Message::HeaderResized(size) => {
                if !self.layout.set_header_height(size.height) {
                    return Task::none();
                }
                let writes = self.relayout();
                self.after_scroll(writes)
            }
            Message::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers;
                Task::none()
            }
            Message::GalleryScrolled(viewport) => {
                self.surface_scrolled(Surface::Gallery, viewport.absolute_offset().x)
            }
            Message::BarScrolled(viewport) => {
                self.surface_scrolled(Surface::Bar, viewport.absolute_offset().x)
            }
            Message::Wheel(delta) => {
                let action = wheel::normalize(
                    delta.into(),
                    self.modifiers.control(),
                    self.layout.viewport.height,
                );
                match action.horizontal_delta() {
                    Some(dx) => {
                        let writes = self.bridge.scroll_by(dx);
                        self.after_scroll(writes)
                    }
                    None => Task::none(),
                }
            }
            Message::PointerMoved(position) => {
                self.pointer = Some(position);
                if let Some(drag) = self.drag.as_mut() {
                    let target = drag.offset_at(position.x);
                    let writes = self.bridge.scroll_to(target);
                    return self.after_scroll(writes);
                }
                self.update_hover();
                Task::none()
            }
            Message::PointerPressed => {
                if let Some(position) = self.pointer {
                    self.drag = Some(DragPan::begin(position.x, self.bridge.offset()));
                }
                Task::none()
            }
            Message::PointerReleased => {
                let Some(drag) = self.drag.take() else {
                    return Task::none();
                };
                if drag.is_click() {
                    let href = self
                        .hovered
                        .and_then(|i| self.catalog.projects().get(i))
                        .and_then(|p| p.href.clone());
                    if let Some(href) = href {
                        open_link(href);
                    }
                }
                Task::none()
            }
            Message::PointerLeft => {
                self.drag = None;
                self.pointer = None;
                self.update_hover();
                Task::none()
            }
            Message::FocusNext => {
                let count = self.catalog.projects().len();
                let next = match self.focused {
                    None => Some(0),
                    Some(i) if i + 1 < count => Some(i + 1),
                    Some(_) => None,
                };
                self.focus(next)
            }
            Message::FocusPrevious => {
                let count = self.catalog.projects().len();
                let previous = match self.focused {
                    None => count.checked_sub(1),
                    Some(i) => i.checked_sub(1),
                };
                self.focus(previous)
            }
            Message::Blur => self.focus(None),
            Message::Activate => {
                if let Some(href) = self.focused_href() {
                    open_link(href);
                }
                Task::none()
            }
            Message::OpenLink(href) => {
                open_link(href);
                Task::none()
            }
            Message::Tick => {
                self.spinner.tick();
                Task::none()
            }
        }
    }

    pub(crate) fn view(&self) -> Element<'_, Message> {
        column![
            self.view_header(),
            self.view_gallery(),
            self.view_scrollbar()
        ]
        .into()
    }

    fn subscription(state: &Self) -> Subscription<Message> {
        let events = event::listen_with(runtime_event);
        let loading = state
            .images
            .iter()
            .any(|image| matches!(image, TileImage::Pending));
        if loading {
            Subscription::batch([events, Subscription::run_with(TICK_MS, ticker::tick_stream)])
        } else {
            events
        }
    }

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.colors.background,
            text_color: self.colors.text,
        }
    }
}

fn runtime_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::Opened { size, .. }) => Some(Message::WindowResized(size)),
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
            Some(Message::ModifiersChanged(modifiers))
        }
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            key_message(key, modifiers)
        }
        _ => None,
    }
}

fn key_message(key: keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Message> {
    use keyboard::key::Named;

    match key.as_ref() {
        keyboard::Key::Character("r") | keyboard::Key::Named(Named::F5) => Some(Message::Reload),
        keyboard::Key::Named(Named::Tab) if modifiers.shift() => Some(Message::FocusPrevious),
        keyboard::Key::Named(Named::Tab | Named::ArrowRight) => Some(Message::FocusNext),
        keyboard::Key::Named(Named::ArrowLeft) => Some(Message::FocusPrevious),
        keyboard::Key::Named(Named::Enter) => Some(Message::Activate),
        keyboard::Key::Named(Named::Escape) => Some(Message::Blur),
        _ => None,
    }
}

/// Hand a link to the platform opener on a background thread.
fn open_link(href: String) {
    std::thread::spawn(move || {
        let mut command = if cfg!(target_os = "macos") {
            std::process::Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = std::process::Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            std::process::Command::new("xdg-open")
        };
        match command.arg(&href).status() {
            Ok(s) if s.success() => log::debug!("opened {href}"),
            Ok(s) => log::warn!("opener exited for {href}: {s}"),
            Err(e) => log::warn!("cannot open {href}: {e}"),
        }
    });
}
