use crate::state::RollcallState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use std::convert::Infallible;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SseEvent {
    CrudStudent,
}

impl SseEvent {
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::CrudStudent => "crud_student",
        }
    }
}

pub async fn sse_feed(
    State(state): State<RollcallState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe_to_sse_feed();

    //lagged subscribers just miss events - the Refresh button covers them
    let stream = BroadcastStream::new(rx).filter_map(|event| {
        event
            .ok()
            .map(|event| Ok(Event::default().event(event.wire_name()).data("")))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud_student_wire_name() {
        assert_eq!(SseEvent::CrudStudent.wire_name(), "crud_student");
    }

    #[tokio::test]
    async fn subscribers_receive_sent_events() {
        let (_dir, state) = RollcallState::for_tests().await;

        let mut rx = state.subscribe_to_sse_feed();
        state.send_sse_event(SseEvent::CrudStudent);

        assert_eq!(rx.recv().await.unwrap(), SseEvent::CrudStudent);
    }
}
