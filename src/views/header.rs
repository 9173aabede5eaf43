use iced::widget::text::Shaping;
use iced::widget::{column, container, mouse_area, row, sensor, text};
use iced::{mouse, Alignment, Element, Length};

use crate::app::{Folio, Message};
use crate::layout::EDGE_MARGIN;

impl Folio {
    /// Two-line masthead on the left, links and the touchpad hint on the right.
    ///
    /// Its height depends on how the title wraps, so the rendered size is
    /// reported back and the gallery takes what is left.
    pub(crate) fn view_header(&self) -> Element<'_, Message> {
        let colors = &self.colors;
        let meta = &self.catalog.meta;

        let lines = column![
            text(&meta.title_lines[0])
                .size(colors.headline)
                .color(colors.text)
                .shaping(Shaping::Advanced),
            text(self.displayed_title())
                .size(colors.headline)
                .color(colors.muted)
                .shaping(Shaping::Advanced),
        ];

        let mut links = row![].spacing(18).align_y(Alignment::Center);
        for link in &meta.links {
            let label = text(&link.label)
                .size(colors.link_text)
                .shaping(Shaping::Advanced);
            // Links without an href render as plain labels.
            let item: Element<'_, Message> = match &link.href {
                Some(href) => mouse_area(label.color(colors.text))
                    .on_press(Message::OpenLink(href.clone()))
                    .interaction(mouse::Interaction::Pointer)
                    .into(),
                None => label.color(colors.muted).into(),
            };
            links = links.push(item);
        }

        let hint = text("Works with touchpad")
            .size(colors.hint_text)
            .color(colors.muted);

        let right = column![links, hint]
            .spacing(8)
            .align_x(Alignment::End);

        // The title column takes the free width so long titles wrap.
        let header = container(row![lines.width(Length::Fill), right].spacing(24).align_y(Alignment::Start))
            .padding(iced::padding::top(24).bottom(16).left(EDGE_MARGIN).right(EDGE_MARGIN))
            .width(Length::Fill);

        sensor(header)
            .on_show(Message::HeaderResized)
            .on_resize(Message::HeaderResized)
            .into()
    }
}
