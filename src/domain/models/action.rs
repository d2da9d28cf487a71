use super::TurnRequest;

pub enum Action {
    BackendRequest(TurnRequest),
}
