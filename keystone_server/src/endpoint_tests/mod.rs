mod dispatch;
mod helpers;
mod media;
mod mocks;
mod posts;
