use crate::notify::{Notification, Notify};
use crate::pipeline::PipelineResult;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Player(PlayerEvent),
    Network(NetworkEvent),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Title(String),
    Playing(bool),
    Position { seconds: f64 },
    Duration { seconds: f64 },
    Error(String),
}

#[derive(Debug, Clone)]
pub enum NetworkEvent {
    TitleResolved { video_id: String, title: String },
    TitleFailed { video_id: String, error: String },
    Notify(Notification),
    PipelineFinished(PipelineResult),
}

impl Notify for mpsc::Sender<Event> {
    fn notify(&self, notification: Notification) {
        if self
            .try_send(Event::Network(NetworkEvent::Notify(notification)))
            .is_err()
        {
            tracing::warn!("event channel full or closed; notification dropped");
        }
    }
}
