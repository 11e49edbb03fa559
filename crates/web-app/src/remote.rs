//! State of data fetched from the remote API.
//!
//! Each fetchable collection is owned by a [`Remote`]. Requests are tracked by
//! token so that a response belonging to an outdated request can never
//! overwrite the result of a newer one.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug)]
pub struct Remote<T> {
    data: Option<T>,
    error: Option<String>,
    in_flight: Option<RequestToken>,
    last_token: u64,
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            in_flight: None,
            last_token: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Updated,
    Failed,
    Stale,
}

impl<T> Remote<T> {
    /// Record the start of a request. Any request started earlier becomes
    /// stale.
    pub fn start(&mut self) -> RequestToken {
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.in_flight = Some(token);
        token
    }

    /// Record the completion of the request identified by `token`.
    ///
    /// Successful data replaces the previous data wholesale. A failure keeps
    /// the previous data. A completion for any token other than the most
    /// recently started request is ignored.
    pub fn resolve(&mut self, token: RequestToken, result: Result<T, String>) -> Resolution {
        if self.in_flight != Some(token) {
            return Resolution::Stale;
        }

        self.in_flight = None;

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                Resolution::Updated
            }
            Err(message) => {
                self.error = Some(message);
                Resolution::Failed
            }
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_initial_state() {
        let remote = Remote::<Vec<u32>>::default();
        assert!(!remote.is_loading());
        assert_eq!(remote.data(), None);
        assert_eq!(remote.error(), None);
    }

    #[test]
    fn test_successful_fetch() {
        let mut remote = Remote::default();
        let token = remote.start();
        assert!(remote.is_loading());
        assert_eq!(remote.resolve(token, Ok(vec![1, 2])), Resolution::Updated);
        assert!(!remote.is_loading());
        assert_eq!(remote.data(), Some(&vec![1, 2]));
        assert_eq!(remote.error(), None);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_data() {
        let mut remote = Remote::default();
        let token = remote.start();
        assert_eq!(remote.resolve(token, Ok(vec![1])), Resolution::Updated);
        let token = remote.start();
        assert_eq!(
            remote.resolve(token, Err(String::from("no connection"))),
            Resolution::Failed
        );
        assert_eq!(remote.data(), Some(&vec![1]));
        assert_eq!(remote.error(), Some("no connection"));
        let token = remote.start();
        assert_eq!(remote.resolve(token, Ok(vec![2])), Resolution::Updated);
        assert_eq!(remote.error(), None);
    }

    #[test]
    fn test_outdated_response_is_ignored() {
        let mut remote = Remote::default();
        let first = remote.start();
        let second = remote.start();
        assert_eq!(remote.resolve(second, Ok(vec![2])), Resolution::Updated);
        assert_eq!(remote.resolve(first, Ok(vec![1])), Resolution::Stale);
        assert_eq!(remote.data(), Some(&vec![2]));
    }

    #[test]
    fn test_response_resolves_only_once() {
        let mut remote = Remote::default();
        let token = remote.start();
        assert_eq!(remote.resolve(token, Ok(vec![1])), Resolution::Updated);
        assert_eq!(remote.resolve(token, Ok(vec![2])), Resolution::Stale);
        assert_eq!(remote.data(), Some(&vec![1]));
    }

    #[test]
    fn test_overlapping_requests_stay_loading() {
        let mut remote = Remote::<Vec<u32>>::default();
        let first = remote.start();
        let second = remote.start();
        assert_eq!(remote.resolve(first, Ok(vec![1])), Resolution::Stale);
        assert!(remote.is_loading());
        assert_eq!(remote.resolve(second, Ok(vec![2])), Resolution::Updated);
        assert!(!remote.is_loading());
    }
}
