//! Example: a login page assembled from declared components.
//!
//! Runs against the recording driver, so no browser is needed.
//!
//! Run with: `cargo run --example login_page -p exodius`

use exodius::prelude::*;
use exodius_core::test_utils::{InMemoryEventBus, RecordingDriver};
use std::sync::Arc;

// --- Components ---

trait TextInput: Send + Sync {
    fn selector(&self) -> &Selector;
}

struct UsernameField(Selector);

impl TextInput for UsernameField {
    fn selector(&self) -> &Selector {
        &self.0
    }
}

impl Component for UsernameField {
    fn create(_ctx: &ComponentContext<'_>) -> Result<Self, ComponentError> {
        Ok(UsernameField(Selector::test_id("username")))
    }
}

struct PasswordField(Selector);

impl TextInput for PasswordField {
    fn selector(&self) -> &Selector {
        &self.0
    }
}

impl Component for PasswordField {
    fn create(_ctx: &ComponentContext<'_>) -> Result<Self, ComponentError> {
        Ok(PasswordField(Selector::test_id("password")))
    }
}

/// Needs both fields; reads their selectors while being constructed.
struct LoginForm {
    driver: Arc<dyn Driver>,
    bus: Arc<dyn EventBus>,
    username: Selector,
    password: Selector,
}

impl LoginForm {
    async fn log_in(&self, user: &str, password: &str) -> Result<(), ComponentError> {
        self.driver.fill(&self.username, user).await?;
        self.driver.fill(&self.password, password).await?;
        self.driver.click(&Selector::test_id("login-submit")).await?;
        let payload = serde_json::json!({ "user": user });
        self.bus.publish(Event::new("login.submitted", payload))?;
        Ok(())
    }
}

fn selector_of<T: TextInput + 'static>(
    ctx: &ComponentContext<'_>,
) -> Result<Selector, ComponentError> {
    ctx.entity()
        .get_component::<T>()
        .map(|field| field.selector().clone())
        .map_err(|e| ComponentError::MissingCapability(e.to_string()))
}

impl Component for LoginForm {
    fn declare(declaration: &mut Declaration<Self>) {
        declaration
            .requires::<UsernameField>()
            .requires::<PasswordField>();
    }

    fn create(ctx: &ComponentContext<'_>) -> Result<Self, ComponentError> {
        Ok(LoginForm {
            driver: ctx.driver().clone(),
            bus: ctx.event_bus().clone(),
            username: selector_of::<UsernameField>(ctx)?,
            password: selector_of::<PasswordField>(ctx)?,
        })
    }
}

// --- Page ---

struct LoginPage;

impl PageEntity for LoginPage {
    fn meta() -> PageMeta {
        PageMeta::new("/login")
            .with_name("Login")
            .with_dom_id("login-root")
    }

    fn compose(entity: &mut Entity) {
        entity
            .add_component::<LoginForm>()
            .add_component::<UsernameField>()
            .add_component::<PasswordField>();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let driver = Arc::new(RecordingDriver::new());
    let bus = Arc::new(InMemoryEventBus::new());

    let page = Entity::for_page::<LoginPage>(driver.clone(), bus.clone())?;
    if let Some(meta) = page.meta() {
        driver.navigate(&meta.url("https://shop.example")).await?;
    }
    page.get_component::<LoginForm>()?
        .log_in("ada", "hunter2")
        .await?;

    println!("{page:?}");
    for action in driver.actions() {
        println!("  {action:?}");
    }
    println!("published {} event(s)", bus.published().len());
    Ok(())
}
