use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};

use crate::{
    ai::{prompts, response, schema, CompletionRequest},
    auth::handlers::internal,
    auth::jwt::AuthUser,
    products::model::ProductRecord,
    profile::dto::{AddLogEntryRequest, ProfileResponse, TotalsQuery},
    profile::model::{BodyStats, DailyGoals, LogEntry, ProfileData},
    profile::repo,
    profile::totals::{daily_totals, NutritionTotals},
    state::AppState,
};

/// Search history keeps the most recent entries only.
const HISTORY_LIMIT: usize = 50;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile/goals", put(update_goals))
        .route("/profile/goals/generate", post(generate_goals))
        .route("/profile/history", post(add_history))
        .route("/profile/log", post(add_log_entry))
        .route("/profile/log/:index", delete(remove_log_entry))
        .route("/profile/log/totals", get(log_totals))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = repo::load_or_default(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(to_response(user_id, profile)))
}

#[instrument(skip(state, goals))]
pub async fn update_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(goals): Json<DailyGoals>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = repo::update(&state.db, user_id, |p| {
        p.goals = goals;
        true
    })
    .await
    .map_err(internal)?;
    info!(%user_id, "daily goals updated");
    Ok(Json(to_response(user_id, applied(profile)?)))
}

/// AI-computed daily goals from body stats; the stats are stored alongside
/// the generated goals.
#[instrument(skip(state, stats))]
pub async fn generate_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(stats): Json<BodyStats>,
) -> Result<Json<DailyGoals>, (StatusCode, String)> {
    let request = CompletionRequest::text(
        prompts::daily_goals_prompt(&stats),
        schema::daily_goals_schema(),
    );
    let text = state.ai.generate(request).await.map_err(|e| {
        error!(error = %e, %user_id, "goal generation failed");
        (e.status(), e.user_message())
    })?;
    let goals = response::parse_daily_goals(&text).map_err(|e| {
        error!(error = %e, %user_id, "goal response invalid");
        (e.status(), e.user_message())
    })?;

    let saved = goals.clone();
    repo::update(&state.db, user_id, move |p| {
        p.goals = saved;
        p.stats = Some(stats);
        true
    })
    .await
    .map_err(internal)?;
    info!(%user_id, calories = goals.calories, "daily goals generated");
    Ok(Json(goals))
}

#[instrument(skip(state, product))]
pub async fn add_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(product): Json<ProductRecord>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = repo::update(&state.db, user_id, |p| {
        push_history(&mut p.history, product);
        true
    })
    .await
    .map_err(internal)?;
    Ok(Json(to_response(user_id, applied(profile)?)))
}

#[instrument(skip(state, body))]
pub async fn add_log_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AddLogEntryRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    if !(body.quantity > 0.0) {
        return Err((StatusCode::BAD_REQUEST, "quantity must be positive".into()));
    }
    let entry = LogEntry {
        product: body.product,
        quantity: body.quantity,
        unit: body.unit,
        added_at: OffsetDateTime::now_utc(),
    };
    let profile = repo::update(&state.db, user_id, |p| {
        p.log.push(entry);
        true
    })
    .await
    .map_err(internal)?;
    Ok(Json(to_response(user_id, applied(profile)?)))
}

#[instrument(skip(state))]
pub async fn remove_log_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(index): Path<usize>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = repo::update(&state.db, user_id, |p| {
        if index < p.log.len() {
            p.log.remove(index);
            true
        } else {
            false
        }
    })
    .await
    .map_err(internal)?;
    match profile {
        Some(profile) => Ok(Json(to_response(user_id, profile))),
        None => {
            warn!(%user_id, index, "log index out of range");
            Err((StatusCode::NOT_FOUND, "Log entry not found".into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn log_totals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<TotalsQuery>,
) -> Result<Json<NutritionTotals>, (StatusCode, String)> {
    let date = match q.date.as_deref() {
        Some(raw) => {
            let format = format_description!("[year]-[month]-[day]");
            Some(time::Date::parse(raw, &format).map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    "date must be YYYY-MM-DD".to_string(),
                )
            })?)
        }
        None => None,
    };
    let profile = repo::load_or_default(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(daily_totals(&profile.log, date)))
}

/// Most recent first, deduplicated by product id, capped.
fn push_history(history: &mut Vec<ProductRecord>, product: ProductRecord) {
    history.retain(|p| p.id != product.id);
    history.insert(0, product);
    history.truncate(HISTORY_LIMIT);
}

fn to_response(user_id: uuid::Uuid, profile: ProfileData) -> ProfileResponse {
    ProfileResponse {
        user_id,
        goals: profile.goals,
        history: profile.history,
        log: profile.log,
        stats: profile.stats,
    }
}

/// Unconditional mutations always apply; a `None` here is a repo bug.
fn applied(profile: Option<ProfileData>) -> Result<ProfileData, (StatusCode, String)> {
    profile.ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "profile update not applied".into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::model::Nutrition;
    use uuid::Uuid;

    fn product(name: &str) -> ProductRecord {
        ProductRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            brand: String::new(),
            category: String::new(),
            image_url: None,
            health_reasoning: String::new(),
            ingredients: vec![],
            nutrition: Nutrition::default(),
            certifications: vec![],
            pros: vec![],
            cons: vec![],
            additives: vec![],
            healthier_alternatives: None,
        }
    }

    #[test]
    fn history_newest_first_and_deduplicated_by_id() {
        let mut history = Vec::new();
        let repeat = product("Oreo");
        push_history(&mut history, product("Milk"));
        push_history(&mut history, repeat.clone());
        push_history(&mut history, product("Oats"));
        push_history(&mut history, repeat.clone());

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].id, repeat.id);
        assert_eq!(history[1].name, "Oats");
        assert_eq!(history[2].name, "Milk");
    }

    #[test]
    fn history_is_capped() {
        let mut history = Vec::new();
        for i in 0..(HISTORY_LIMIT + 10) {
            push_history(&mut history, product(&format!("item {i}")));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].name, format!("item {}", HISTORY_LIMIT + 9));
    }
}
