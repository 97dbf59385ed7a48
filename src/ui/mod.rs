//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod listings;
mod returns;
mod widgets;

use crate::app::App;
use crate::state::Route;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Draw the main layout with sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);

    layout::draw_sidebar(frame, sidebar_area, app);

    // Draw main content based on current route
    match app.state.current_route() {
        Route::UserListings(view) => listings::draw(frame, main_area, app, view),
        Route::InviteProvider => forms::draw_invite_provider(frame, main_area, app),
        Route::Returns => returns::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Error dialog on top of everything (modal)
    if app.state.has_errors() {
        render_error_dialog(frame, &app.state.notices);
    }
}
