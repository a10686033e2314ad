use backend_domain::SubscriptionBook;

use crate::AppState;

pub async fn list_subscriptions(state: &AppState) -> SubscriptionBook {
    state.subscriptions.read().await.clone()
}
