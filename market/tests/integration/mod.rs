mod bidding;
mod console_session;
mod registration;
mod search;
