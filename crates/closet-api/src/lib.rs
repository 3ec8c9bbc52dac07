//! JSON REST API for Closet.
//!
//! Exposes an axum [`Router`] backed by any [`closet_core::store::OutfitStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility; the
//! acting user is taken from the path.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", closet_api::api_router(store.clone(), policy))
//! ```

pub mod error;
pub mod extract;
pub mod outfits;
pub mod recommendations;
pub mod wear;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use closet_core::{
  recommend::{RecommendPolicy, Recommender},
  store::OutfitStore,
};

pub use error::ApiError;

/// Shared handler state.
pub struct AppState<S> {
  pub store:       Arc<S>,
  pub recommender: Recommender<S>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:       Arc::clone(&self.store),
      recommender: self.recommender.clone(),
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, policy: RecommendPolicy) -> Router<()>
where
  S: OutfitStore + 'static,
{
  let state = AppState {
    recommender: Recommender::new(Arc::clone(&store), policy),
    store,
  };

  Router::new()
    // Outfits
    .route(
      "/users/{user_id}/outfits",
      get(outfits::list::<S>).post(outfits::create::<S>),
    )
    .route(
      "/users/{user_id}/outfits/{id}",
      get(outfits::get_one::<S>)
        .patch(outfits::update::<S>)
        .delete(outfits::delete::<S>),
    )
    // Wear history
    .route(
      "/users/{user_id}/outfits/{id}/wear-history",
      get(wear::list::<S>),
    )
    .route("/users/{user_id}/wear-history", post(wear::record::<S>))
    // Recommendations
    .route(
      "/users/{user_id}/recommendations",
      get(recommendations::handler::<S>),
    )
    .with_state(state)
}
