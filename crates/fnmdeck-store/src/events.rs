use crossbeam_channel::{Receiver, Sender, unbounded};

/// Names the store section that changed. `StatusChanged` covers the
/// busy/error slots; the list events fire only when the backing data
/// actually moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    InstalledChanged,
    RemoteChanged,
    SettingsChanged,
    StatusChanged,
}

#[derive(Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<StoreEvent>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (sender, receiver) = unbounded();
        self.senders.push(sender);
        receiver
    }

    pub(crate) fn emit(&mut self, event: StoreEvent) {
        self.senders.retain(|sender| sender.send(event).is_ok());
    }
}
