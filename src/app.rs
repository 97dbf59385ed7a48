//! Application state and core logic

use crate::api::{ApiClient, ApiClientTrait};
use crate::config::ConsoleConfig;
use crate::state::onboarding::{FormPatch, OnboardingWizard, StepChange, ValidationRules};
use crate::state::{AppState, FormButton, ListingView, Navigator, Route};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Back-office API client
    api: Box<dyn ApiClientTrait>,
    pub config: ConsoleConfig,
    rules: ValidationRules,
    /// Onboarding session, present while the invite page is open
    pub wizard: Option<OnboardingWizard>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App talking to the configured API
    pub fn new(config: ConsoleConfig, rules: ValidationRules) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        tracing::info!("using API at {}", api.base_url());
        Ok(Self::with_api(Box::new(api), config, rules))
    }

    pub fn with_api(
        api: Box<dyn ApiClientTrait>,
        config: ConsoleConfig,
        rules: ValidationRules,
    ) -> Self {
        Self {
            state: AppState::new(config.rows_per_page()),
            api,
            config,
            rules,
            wizard: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Navigate to a route and mount whatever it needs
    pub async fn navigate(&mut self, route: Route) {
        let before = self.state.current_route();
        self.state.router.navigate(route);
        if before != self.state.current_route() {
            self.on_route_changed().await;
        }
    }

    async fn on_route_changed(&mut self) {
        let route = self.state.current_route();
        tracing::debug!("route changed to {route}");

        match route {
            Route::InviteProvider => {
                if self.wizard.is_none() {
                    self.wizard = Some(OnboardingWizard::new(self.rules.clone()));
                    self.state.reset_form_focus();
                }
            }
            _ => {
                if let Some(wizard) = self.wizard.take() {
                    tracing::debug!(
                        wizard = %wizard.id(),
                        status = ?wizard.status(),
                        "onboarding closed"
                    );
                }
            }
        }

        if route == Route::Returns {
            self.load_returns().await;
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.notices.clear_status();

        // Track route before handling key to detect navigation
        let route_before = self.state.current_route();

        match route_before {
            Route::UserListings(view) => self.handle_listings_key(key, view),
            Route::InviteProvider => self.handle_invite_key(key).await,
            Route::Returns => self.handle_returns_key(key).await,
        }

        if route_before != self.state.current_route() {
            self.on_route_changed().await;
        }

        Ok(())
    }

    /// Handle keys in the user listings view
    fn handle_listings_key(&mut self, key: KeyEvent, view: ListingView) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Tab | KeyCode::Char('t') => {
                self.state.router.navigate(Route::UserListings(view.toggle()))
            }
            KeyCode::Char('i') => self.state.router.navigate(Route::InviteProvider),
            KeyCode::Char('o') => self.state.router.navigate(Route::Returns),
            KeyCode::Esc | KeyCode::Backspace => {
                self.state.router.go_back();
            }
            _ => {}
        }
    }

    /// Handle keys in the invite provider wizard
    async fn handle_invite_key(&mut self, key: KeyEvent) {
        let Some(wizard) = self.wizard.as_mut() else {
            return;
        };
        let field_count = wizard.step().fields().len();
        let on_buttons = self.state.on_button_row(field_count);

        let change = match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.state.next_form_field(field_count);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.prev_form_field(field_count);
                None
            }
            KeyCode::Left | KeyCode::Right if on_buttons => {
                self.state.form_selected_button.toggle();
                None
            }
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(crate::platform::COPY_MODIFIER) =>
            {
                Some(
                    wizard
                        .continue_step(
                            self.api.as_ref(),
                            &mut self.state.router,
                            &mut self.state.notices,
                        )
                        .await,
                )
            }
            KeyCode::Esc => Some(wizard.back(&mut self.state.router)),
            KeyCode::Enter if on_buttons => match self.state.form_selected_button {
                FormButton::Back => Some(wizard.back(&mut self.state.router)),
                FormButton::Continue => Some(
                    wizard
                        .continue_step(
                            self.api.as_ref(),
                            &mut self.state.router,
                            &mut self.state.notices,
                        )
                        .await,
                ),
            },
            // Enter in a field moves on to the next one
            KeyCode::Enter => {
                self.state.next_form_field(field_count);
                None
            }
            KeyCode::Char(c) if !on_buttons && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                type_char(wizard, self.state.active_form_field, c);
                None
            }
            KeyCode::Backspace if !on_buttons => {
                erase_char(wizard, self.state.active_form_field);
                None
            }
            _ => None,
        };

        match change {
            Some(StepChange::Advanced(_) | StepChange::Back(_)) => self.state.reset_form_focus(),
            Some(StepChange::Rejected) => {
                // Jump to the first field that needs attention
                let step = wizard.step();
                if let Some(index) = step
                    .fields()
                    .iter()
                    .position(|f| wizard.errors().message(f.id).is_some())
                {
                    self.state.active_form_field = index;
                }
            }
            _ => {}
        }
    }

    /// Handle keys in the return orders view
    async fn handle_returns_key(&mut self, key: KeyEvent) {
        if self.state.returns.action_menu.is_some() {
            self.handle_action_menu_key(key).await;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc | KeyCode::Backspace => {
                if !self.state.router.go_back() {
                    self.state.router.navigate(Route::user_listings());
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.state.returns.move_selection_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.returns.move_selection_up(),
            KeyCode::Right | KeyCode::Char('n') => {
                if self.state.returns.next_page() {
                    self.load_returns().await;
                }
            }
            KeyCode::Left | KeyCode::Char('p') => {
                if self.state.returns.prev_page() {
                    self.load_returns().await;
                }
            }
            KeyCode::Char('r') => {
                self.state.returns.cycle_rows_per_page();
                self.config.rows_per_page = Some(self.state.returns.rows_per_page);
                if let Err(err) = self.config.save() {
                    tracing::warn!("failed to save config: {err:#}");
                    self.state.push_error(format!("Could not save settings: {err}"));
                }
                self.load_returns().await;
            }
            KeyCode::Char('R') | KeyCode::F(5) => self.load_returns().await,
            KeyCode::Enter => {
                if !self.state.returns.open_action_menu() {
                    if let Some(row) = self.state.returns.selected_row() {
                        let message = format!("{} cannot be updated", row.state.label());
                        self.state.notices.set_status(message);
                    }
                }
            }
            KeyCode::Char('y') => self.copy_selected_order_id(),
            KeyCode::Char('c') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                self.copy_selected_order_id()
            }
            _ => {}
        }
    }

    /// Handle keys while the status popover is open
    async fn handle_action_menu_key(&mut self, key: KeyEvent) {
        let returns = &mut self.state.returns;
        let Some(menu) = returns.action_menu.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => menu.highlight_next(),
            KeyCode::Up | KeyCode::Char('k') => menu.highlight_prev(),
            KeyCode::Char(' ') => menu.select_highlighted(),
            KeyCode::Enter | KeyCode::Char('u') => {
                returns
                    .apply_decision(self.api.as_ref(), &mut self.state.notices)
                    .await;
            }
            KeyCode::Esc | KeyCode::Char('c') => returns.close_action_menu(),
            _ => {}
        }
    }

    async fn load_returns(&mut self) {
        if let Err(err) = self.state.returns.refresh(self.api.as_ref()).await {
            tracing::warn!("failed to load return orders: {err}");
            self.state.push_error(err.user_message());
        }
    }

    fn copy_selected_order_id(&mut self) {
        let Some(row) = self.state.returns.selected_row() else {
            return;
        };
        let order_id = row.order_id.clone();
        match copy_to_clipboard(&order_id) {
            Ok(()) => self
                .state
                .notices
                .set_status(format!("Copied order id {order_id}")),
            Err(err) => {
                tracing::warn!("failed to copy order id: {err:#}");
                self.state.push_error(format!("Could not copy to clipboard: {err}"));
            }
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Append a typed character to the focused field
fn type_char(wizard: &mut OnboardingWizard, index: usize, c: char) {
    let Some(field) = wizard.step().field(index) else {
        return;
    };
    let Some(c) = field.normalize_char(c) else {
        return;
    };
    let mut value = wizard.values().owned(field.id);
    value.push(c);
    wizard.edit(FormPatch::single(field.id, value));
}

fn erase_char(wizard: &mut OnboardingWizard, index: usize) {
    let Some(field) = wizard.step().field(index) else {
        return;
    };
    let mut value = wizard.values().owned(field.id);
    if value.pop().is_some() {
        wizard.edit(FormPatch::single(field.id, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockApiClientTrait};
    use crate::state::onboarding::{FieldId, Step, WizardStatus};
    use crate::state::ReturnOrderPage;

    fn app_with(api: MockApiClientTrait) -> App {
        App::with_api(
            Box::new(api),
            ConsoleConfig::default(),
            ValidationRules::default(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    fn returns_page(state: &str) -> ReturnOrderPage {
        serde_json::from_value(serde_json::json!({
            "count": 1,
            "data": [{
                "_id": "row-1",
                "orderId": "order-1",
                "state": state,
            }]
        }))
        .unwrap()
    }

    mod routing {
        use super::*;

        #[tokio::test]
        async fn test_starts_on_user_listings_without_wizard() {
            let app = app_with(MockApiClientTrait::new());
            assert_eq!(app.state.current_route(), Route::user_listings());
            assert!(app.wizard.is_none());
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_invite_key_mounts_wizard() {
            let mut app = app_with(MockApiClientTrait::new());
            app.handle_key(key(KeyCode::Char('i'))).await.unwrap();
            assert_eq!(app.state.current_route(), Route::InviteProvider);
            let wizard = app.wizard.as_ref().unwrap();
            assert_eq!(wizard.step(), Step::User);
        }

        #[tokio::test]
        async fn test_esc_on_first_step_unmounts_wizard() {
            let mut app = app_with(MockApiClientTrait::new());
            app.navigate(Route::InviteProvider).await;
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(app.state.current_route(), Route::provider_listings());
            assert!(app.wizard.is_none());
        }

        #[tokio::test]
        async fn test_tab_toggles_listing_view() {
            let mut app = app_with(MockApiClientTrait::new());
            app.handle_key(key(KeyCode::Char('t'))).await.unwrap();
            assert_eq!(app.state.current_route(), Route::provider_listings());
        }

        #[tokio::test]
        async fn test_q_quits_from_listings() {
            let mut app = app_with(MockApiClientTrait::new());
            app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
            assert!(app.should_quit());
        }
    }

    mod wizard {
        use super::*;

        #[tokio::test]
        async fn test_typing_edits_focused_field() {
            let mut app = app_with(MockApiClientTrait::new());
            app.navigate(Route::InviteProvider).await;
            type_text(&mut app, "asha@example.com").await;
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();

            let wizard = app.wizard.as_ref().unwrap();
            assert_eq!(wizard.values().value(FieldId::Email), "asha@example.co");
        }

        #[tokio::test]
        async fn test_numeric_and_tel_fields_filter_input() {
            let mut app = app_with(MockApiClientTrait::new());
            app.navigate(Route::InviteProvider).await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "98x76").await;

            let wizard = app.wizard.as_ref().unwrap();
            assert_eq!(wizard.values().value(FieldId::Mobile), "9876");
        }

        #[tokio::test]
        async fn test_submit_shortcut_with_empty_step_focuses_first_error() {
            let mut app = app_with(MockApiClientTrait::new());
            app.navigate(Route::InviteProvider).await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
                .await
                .unwrap();

            let wizard = app.wizard.as_ref().unwrap();
            assert_eq!(wizard.step(), Step::User);
            assert!(wizard.submission_attempted());
            assert_eq!(app.state.active_form_field, 0);
        }

        #[tokio::test]
        async fn test_server_failure_opens_error_dialog() {
            let mut api = MockApiClientTrait::new();
            api.expect_create_organization()
                .times(1)
                .returning(|_| Err(ApiError::from_response(409, r#"{"error":"duplicate PAN"}"#)));

            let mut app = app_with(api);
            app.navigate(Route::InviteProvider).await;
            if let Some(wizard) = app.wizard.as_mut() {
                wizard.edit(crate::state::onboarding::fixtures::valid_patch());
                for _ in 0..3 {
                    wizard.request_continue();
                }
            }
            app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
                .await
                .unwrap();

            assert_eq!(app.state.notices.current_error(), Some("duplicate PAN"));
            assert_eq!(app.state.current_route(), Route::InviteProvider);
            let wizard = app.wizard.as_ref().unwrap();
            assert_eq!(wizard.status(), WizardStatus::Editing);

            // Keys only dismiss the dialog while it is open
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(!app.state.has_errors());
            assert_eq!(app.state.current_route(), Route::InviteProvider);
        }

        #[tokio::test]
        async fn test_successful_invite_returns_to_listings() {
            let mut api = MockApiClientTrait::new();
            api.expect_create_organization()
                .times(1)
                .returning(|_| Ok(()));

            let mut app = app_with(api);
            app.navigate(Route::InviteProvider).await;
            if let Some(wizard) = app.wizard.as_mut() {
                wizard.edit(crate::state::onboarding::fixtures::valid_patch());
                for _ in 0..3 {
                    wizard.request_continue();
                }
            }
            app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
                .await
                .unwrap();

            assert_eq!(app.state.current_route(), Route::user_listings());
            assert!(app.wizard.is_none());
            assert_eq!(app.state.notices.status(), Some("Invitation sent"));
        }
    }

    mod returns {
        use super::*;

        #[tokio::test]
        async fn test_opening_returns_loads_first_page() {
            let mut api = MockApiClientTrait::new();
            api.expect_list_return_orders()
                .withf(|page, rows| *page == 0 && *rows == 10)
                .times(1)
                .returning(|_, _| Ok(returns_page("Return_Initiated")));

            let mut app = app_with(api);
            app.handle_key(key(KeyCode::Char('o'))).await.unwrap();

            assert_eq!(app.state.current_route(), Route::Returns);
            assert!(app.state.returns.loaded);
            assert_eq!(app.state.returns.rows.len(), 1);
        }

        #[tokio::test]
        async fn test_load_failure_is_reported() {
            let mut api = MockApiClientTrait::new();
            api.expect_list_return_orders()
                .times(1)
                .returning(|_, _| Err(ApiError::from_response(503, "")));

            let mut app = app_with(api);
            app.navigate(Route::Returns).await;
            assert_eq!(
                app.state.notices.current_error(),
                Some("Request failed with status code 503")
            );
        }

        #[tokio::test]
        async fn test_unsaved_page_size_is_reported_and_app_keeps_running() {
            let mut api = MockApiClientTrait::new();
            api.expect_list_return_orders()
                .withf(|_, rows| *rows == 10)
                .times(1)
                .returning(|_, _| Ok(returns_page("Return_Initiated")));
            api.expect_list_return_orders()
                .withf(|_, rows| *rows == 25)
                .times(1)
                .returning(|_, _| Ok(returns_page("Return_Initiated")));

            let blocker =
                std::env::temp_dir().join(format!("seller-console-{}", uuid::Uuid::new_v4()));
            std::fs::write(&blocker, "not a directory").unwrap();
            let config = ConsoleConfig {
                file: Some(blocker.join("config.json")),
                ..Default::default()
            };
            let mut app = App::with_api(Box::new(api), config, ValidationRules::default());
            app.navigate(Route::Returns).await;

            assert!(app.handle_key(key(KeyCode::Char('r'))).await.is_ok());

            assert_eq!(app.state.returns.rows_per_page, 25);
            assert_eq!(app.state.notices.error_count(), 1);
            assert!(app
                .state
                .notices
                .current_error()
                .unwrap()
                .starts_with("Could not save settings"));
            assert!(!app.should_quit());

            std::fs::remove_file(&blocker).unwrap();
        }

        #[tokio::test]
        async fn test_enter_on_settled_row_does_not_open_menu() {
            let mut api = MockApiClientTrait::new();
            api.expect_list_return_orders()
                .times(1)
                .returning(|_, _| Ok(returns_page("Liquidated")));

            let mut app = app_with(api);
            app.navigate(Route::Returns).await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert!(app.state.returns.action_menu.is_none());
            assert_eq!(
                app.state.notices.status(),
                Some("Liquidated cannot be updated")
            );
        }

        #[tokio::test]
        async fn test_menu_keys_select_and_cancel() {
            let mut api = MockApiClientTrait::new();
            api.expect_list_return_orders()
                .times(1)
                .returning(|_, _| Ok(returns_page("Return_Initiated")));
            api.expect_update_return_state().never();

            let mut app = app_with(api);
            app.navigate(Route::Returns).await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();

            let menu = app.state.returns.action_menu.as_ref().unwrap();
            assert_eq!(menu.selected, Some(crate::state::ReturnDecision::Reject));

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(app.state.returns.action_menu.is_none());
            assert_eq!(app.state.current_route(), Route::Returns);
        }
    }
}
