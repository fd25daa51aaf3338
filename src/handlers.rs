use crate::controller::{Action, DashboardSnapshot};
use crate::models::{AddSubscriptionForm, SubscriptionId};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, State},
    response::{Html, Redirect},
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut controller = state.controller.lock().await;
    let alert = controller.take_alert();
    Html(render_index(controller.dashboard(), alert.as_deref()))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let controller = state.controller.lock().await;
    Json(controller.dashboard().snapshot())
}

pub async fn add_subscription(
    State(state): State<AppState>,
    Form(form): Form<AddSubscriptionForm>,
) -> Redirect {
    apply(&state, Action::AddSubscription(form.into_new_subscription())).await
}

pub async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Redirect {
    apply(&state, Action::DeleteSubscription(SubscriptionId(id))).await
}

pub async fn toggle_theme(State(state): State<AppState>) -> Redirect {
    apply(&state, Action::ToggleTheme).await
}

pub async fn toggle_mode(State(state): State<AppState>) -> Redirect {
    apply(&state, Action::ToggleMode).await
}

pub async fn toggle_chart(State(state): State<AppState>) -> Redirect {
    apply(&state, Action::ToggleChartType).await
}

pub async fn refresh_insights(State(state): State<AppState>) -> Redirect {
    apply(&state, Action::RefreshInsights).await
}

async fn apply(state: &AppState, action: Action) -> Redirect {
    state.controller.lock().await.dispatch(action).await;
    Redirect::to("/")
}
