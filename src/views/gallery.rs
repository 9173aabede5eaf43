use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::text::Shaping;
use iced::widget::{column, container, image as iced_image, mouse_area, row, scrollable, space, stack, text};
use iced::{mouse, Element, Length};

use crate::app::{bar_id, gallery_id, Folio, Message, TileImage};
use crate::layout::{BAR_HEIGHT, CAPTION_HEIGHT, EDGE_MARGIN, TILE_GAP};
use crate::manifest::Project;
use crate::util;

const DOT_SIZE: f32 = 6.0;
const SPINNER_SIZE: f32 = 22.0;

impl Folio {
    /// The horizontal track with an input overlay stacked on top.
    ///
    /// The overlay owns every pointer and wheel event over the gallery so
    /// hover, drag, and wheel translation all go through the scroll bridge.
    pub(crate) fn view_gallery(&self) -> Element<'_, Message> {
        let image_height = self.layout.image_height();
        let projects = self.catalog.projects();

        let mut track = row![].padding(iced::padding::left(EDGE_MARGIN).right(EDGE_MARGIN));
        for (i, (project, extent)) in projects.iter().zip(&self.track.tiles).enumerate() {
            if i > 0 {
                track = track.push(self.view_dot(image_height));
            }
            track = track.push(self.view_tile(i, project, extent.width, image_height));
        }

        let gallery = scrollable(track)
            .id(gallery_id())
            .direction(Direction::Horizontal(
                Scrollbar::new().width(0.0).scroller_width(0.0),
            ))
            .on_scroll(Message::GalleryScrolled)
            .width(Length::Fill)
            .height(Length::Fixed(self.layout.available_height));

        let clickable = self
            .hovered
            .and_then(|i| projects.get(i))
            .is_some_and(|p| p.href.is_some());
        let interaction = if self.drag.is_some() {
            mouse::Interaction::Grabbing
        } else if clickable {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::Grab
        };

        let overlay = mouse_area(space::Space::new().width(Length::Fill).height(Length::Fill))
            .on_move(Message::PointerMoved)
            .on_press(Message::PointerPressed)
            .on_release(Message::PointerReleased)
            .on_exit(Message::PointerLeft)
            .on_scroll(Message::Wheel)
            .interaction(interaction);

        stack![gallery, overlay].into()
    }

    fn view_tile<'a>(
        &'a self,
        index: usize,
        project: &'a Project,
        width: f32,
        image_height: f32,
    ) -> Element<'a, Message> {
        let colors = &self.colors;

        let picture: Element<'a, Message> = match self.images.get(index) {
            Some(TileImage::Ready(asset)) => iced_image(asset.handle.clone())
                .width(Length::Fixed(width))
                .height(Length::Fixed(image_height))
                .into(),
            Some(TileImage::Pending) | None => container(
                text(self.spinner.glyph())
                    .size(SPINNER_SIZE)
                    .color(colors.muted)
                    .shaping(Shaping::Advanced),
            )
            .center_x(Length::Fixed(width))
            .center_y(Length::Fixed(image_height))
            .style(colors.placeholder_style())
            .into(),
            Some(TileImage::Failed) => container(space::Space::new())
                .width(Length::Fixed(width))
                .height(Length::Fixed(image_height))
                .style(colors.placeholder_style())
                .into(),
        };

        let capacity = util::caption_capacity(width, colors.caption_text);
        let caption_color = if self.hovered == Some(index) || self.focused == Some(index) {
            colors.hover_text
        } else {
            colors.text
        };
        let caption = container(
            text(util::truncate_str(&project.title, capacity))
                .size(colors.caption_text)
                .color(caption_color)
                .shaping(Shaping::Advanced),
        )
        .padding(iced::padding::top(8))
        .height(Length::Fixed(CAPTION_HEIGHT));

        column![picture, caption].width(Length::Fixed(width)).into()
    }

    fn view_dot(&self, image_height: f32) -> Element<'_, Message> {
        let dot = container(
            space::Space::new()
                .width(Length::Fixed(DOT_SIZE))
                .height(Length::Fixed(DOT_SIZE)),
        )
        .style(self.colors.dot_style());

        container(dot)
            .center_x(Length::Fixed(TILE_GAP))
            .center_y(Length::Fixed(image_height))
            .into()
    }

    /// Thin strip with a visible scrollbar over an empty spacer as wide as the track.
    /// Spans the full window so both surfaces share one scroll range.
    pub(crate) fn view_scrollbar(&self) -> Element<'_, Message> {
        let spacer = space::Space::new()
            .width(Length::Fixed(self.bridge.content_width()))
            .height(Length::Fixed(1.0));

        let bar = scrollable(spacer)
            .id(bar_id())
            .direction(Direction::Horizontal(
                Scrollbar::new().width(BAR_HEIGHT).scroller_width(BAR_HEIGHT),
            ))
            .on_scroll(Message::BarScrolled)
            .width(Length::Fill)
            .height(Length::Fixed(BAR_HEIGHT));

        // Wheel only, so scrollbar drags still reach the scrollable below.
        let wheel = mouse_area(space::Space::new().width(Length::Fill).height(Length::Fill))
            .on_scroll(Message::Wheel);

        stack![bar, wheel].into()
    }
}
