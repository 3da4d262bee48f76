mod health_check;
mod subscriptions;

pub(crate) use health_check::health_check;
pub(crate) use subscriptions::subscribe;
