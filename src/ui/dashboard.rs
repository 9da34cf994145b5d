// SPDX-License-Identifier: MPL-2.0
//! Role-specific dashboard page.
//!
//! The page is stateless: it lists the actions of the signed-in role and
//! reports presses and scroll offsets upward.

use crate::dashboard::{Action, Role};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::scrollable::Viewport;
use iced::widget::{button, container, text, Column, Container, Id, Row, Scrollable, Space};
use iced::{alignment, Element, Length};

/// Widget id of the page scrollable.
pub const SCROLLABLE_ID: &str = "dashboard-page";

const CARDS_PER_ROW: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Action(Action),
    ToggleTheme,
    /// Vertical page offset in pixels.
    Scrolled(f32),
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub role: Role,
    pub user_name: &'a str,
    pub theme_mode: ThemeMode,
}

fn action_card<'a>(i18n: &I18n, action: Action) -> Element<'a, Message> {
    let label = Container::new(text(i18n.tr(&action.label_key())).size(typography::BODY_LG))
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center);

    let press = button(label)
        .on_press(Message::Action(action))
        .width(Length::Fill)
        .padding(spacing::MD);
    let press = match action {
        Action::Logout | Action::KeyboardShortcuts => press.style(styles::button::secondary(false)),
        _ => press.style(styles::button::primary(false)),
    };

    Container::new(press)
        .width(Length::Fixed(sizing::ACTION_CARD_WIDTH))
        .into()
}

pub fn view<'a>(ctx: ViewContext<'_>) -> Element<'a, Message> {
    let role_name = ctx.i18n.tr(ctx.role.label_key());
    let mode_name = ctx.i18n.tr(ctx.theme_mode.label_key());

    let theme_toggle = button(
        text(ctx.i18n.tr_with_args(
            "action-toggle-theme",
            &[("mode", mode_name.as_str())],
        ))
        .size(typography::BODY_SM),
    )
    .on_press(Message::ToggleTheme)
    .padding([spacing::XXS, spacing::SM])
    .style(styles::button::secondary(false));

    let header = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(text(ctx.i18n.tr("app-title")).size(typography::TITLE_MD))
        .push(Space::new().width(Length::Fill))
        .push(
            text(ctx.i18n.tr_with_args(
                "dashboard-signed-in-as",
                &[("role", role_name.as_str())],
            ))
            .size(typography::BODY_SM),
        )
        .push(theme_toggle);

    let welcome = text(
        ctx.i18n
            .tr_with_args("dashboard-welcome", &[("name", ctx.user_name)]),
    )
    .size(typography::TITLE_LG);

    let actions = Action::for_role(ctx.role);
    let grid = Column::with_children(actions.chunks(CARDS_PER_ROW).map(|chunk| {
        Element::from(
            Row::with_children(chunk.iter().map(|action| action_card(ctx.i18n, *action)))
                .spacing(spacing::MD),
        )
    }))
    .spacing(spacing::MD);

    let section = container(
        Column::new()
            .spacing(spacing::MD)
            .push(text(ctx.i18n.tr("dashboard-quick-actions")).size(typography::TITLE_SM))
            .push(grid),
    )
    .padding(spacing::LG)
    .style(styles::container::panel);

    let page = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(header)
        .push(welcome)
        .push(section);

    Scrollable::new(page)
        .id(Id::new(SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport: Viewport| Message::Scrolled(viewport.absolute_offset().y))
        .into()
}

pub mod sign_in {
    //! Role picker shown before the dashboard.

    use super::*;

    pub fn view<'a>(i18n: &I18n) -> Element<'a, Role> {
        let choices = Role::ALL.into_iter().map(|role| {
            let role_name = i18n.tr(role.label_key());
            Element::from(
                button(
                    Container::new(text(
                        i18n.tr_with_args("sign-in-as", &[("role", role_name.as_str())]),
                    ))
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
                )
                .on_press(role)
                .width(Length::Fill)
                .padding(spacing::SM)
                .style(styles::button::primary(false)),
            )
        });

        let card = container(
            Column::new()
                .spacing(spacing::MD)
                .push(text(i18n.tr("sign-in-title")).size(typography::TITLE_LG))
                .push(text(i18n.tr("sign-in-prompt")).size(typography::BODY))
                .push(Column::with_children(choices).spacing(spacing::XS)),
        )
        .width(Length::Fixed(sizing::SIGN_IN_WIDTH))
        .padding(spacing::LG)
        .style(styles::container::panel);

        container(card).center(Length::Fill).into()
    }
}
