// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The current screen sits at the bottom of a stack. Open dialogs are
//! layered above it and toasts go on top of everything.

use super::{Message, Screen};
use crate::dashboard::Role;
use crate::i18n::fluent::I18n;
use crate::notifications::Manager;
use crate::overlays::Registry;
use crate::surface::MemorySurface;
use crate::ui::dashboard::{self, sign_in, ViewContext as DashboardViewContext};
use crate::ui::surface_view::ViewContext as SurfaceViewContext;
use crate::ui::theming::AppTheme;
use crate::ui::{modal, toast};
use iced::widget::{Container, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub role: Role,
    pub user_name: Option<&'a str>,
    pub theme: &'a AppTheme,
    pub overlays: &'a Registry<MemorySurface>,
    pub notifications: &'a Manager<MemorySurface>,
    pub spinner_rotation: f32,
}

/// Renders the current screen with its dialogs and toasts.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let page: Element<'_, Message> = match ctx.screen {
        Screen::SignIn => sign_in::view(ctx.i18n).map(Message::SignIn),
        Screen::Dashboard => view_dashboard(&ctx),
    };

    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(
            Container::new(page)
                .width(Length::Fill)
                .height(Length::Fill),
        );

    let surface_ctx = SurfaceViewContext {
        spinner_rotation: ctx.spinner_rotation,
        accent: ctx.theme.colors.brand_primary,
    };
    for layer in modal::layers(ctx.overlays, ctx.theme.colors.backdrop, surface_ctx) {
        stack = stack.push(layer.map(Message::Overlay));
    }

    if let Some(toasts) = toast::view_overlay(ctx.notifications, &ctx.theme.colors) {
        stack = stack.push(toasts.map(Message::Toast));
    }

    stack.into()
}

fn view_dashboard<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let fallback_name;
    let user_name = match ctx.user_name {
        Some(name) => name,
        None => {
            fallback_name = ctx.i18n.tr(ctx.role.label_key());
            fallback_name.as_str()
        }
    };

    dashboard::view(DashboardViewContext {
        i18n: ctx.i18n,
        role: ctx.role,
        user_name,
        theme_mode: ctx.theme.mode,
    })
    .map(Message::Dashboard)
}
