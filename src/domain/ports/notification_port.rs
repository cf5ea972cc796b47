/// Port for user-facing error notices.
pub trait NotificationSink: Send + Sync {
    /// Clears every pending or displayed notice.
    fn dismiss_all(&self);

    /// Displays one error notice.
    fn error(&self, message: &str);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SinkCall {
        DismissAll,
        Error(String),
    }

    #[derive(Default)]
    pub struct MockNotificationSink {
        pub calls: Mutex<Vec<SinkCall>>,
    }

    impl MockNotificationSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<SinkCall> {
            self.calls.lock().clone()
        }

        pub fn errors(&self) -> Vec<String> {
            self.calls
                .lock()
                .iter()
                .filter_map(|call| match call {
                    SinkCall::Error(message) => Some(message.clone()),
                    SinkCall::DismissAll => None,
                })
                .collect()
        }
    }

    impl NotificationSink for MockNotificationSink {
        fn dismiss_all(&self) {
            self.calls.lock().push(SinkCall::DismissAll);
        }

        fn error(&self, message: &str) {
            self.calls.lock().push(SinkCall::Error(message.to_string()));
        }
    }
}
