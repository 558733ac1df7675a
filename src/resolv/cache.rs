//! A cache for responses.
//!
//! Responses are cached by their first question, i.e., by name, class, and
//! type. A newer response to the same question replaces the older one.
//!
//! Only successful NOERROR responses are cached. When looking up an entry,
//! it is only returned if all its records still have time to live left.
//! Expired entries are not removed but simply ignored until a fresh
//! response replaces them or the cache evicts them for lack of space.

use super::response::Response;
use crate::base::iana::{Class, Rtype};
use crate::base::name::Name;
use crate::base::question::Question;
use moka::future::Cache;
use tracing::{debug, trace};

//------------ ResponseCache -------------------------------------------------

/// A cache of responses keyed by question.
#[derive(Clone, Debug)]
pub struct ResponseCache {
    /// The actual cache.
    cache: Cache<Key, Response>,
}

impl ResponseCache {
    /// Creates a new cache holding up to `capacity` responses.
    pub fn new(capacity: u64) -> Self {
        ResponseCache {
            cache: Cache::new(capacity),
        }
    }

    /// Returns the cached response for `question` if there is a usable one.
    pub async fn get(&self, question: &Question) -> Option<Response> {
        let response = match self.cache.get(&Key::from(question)).await {
            Some(response) => response,
            None => {
                trace!("cache miss for {}", question);
                return None;
            }
        };
        if response.is_expired() {
            debug!("cache entry for {} has expired", question);
            return None;
        }
        trace!("cache hit for {}", question);
        Some(response)
    }

    /// Adds a response to the cache if it is cacheable.
    ///
    /// Returns whether the response has been added.
    pub async fn insert(&self, response: Response) -> bool {
        if !response.is_cacheable() {
            return false;
        }
        let key = match response.first_question() {
            Some(question) => Key::from(question),
            None => return false,
        };
        debug!(
            "caching response for {} {} {}",
            key.qname, key.qclass, key.qtype
        );
        self.cache.insert(key, response).await;
        true
    }

    /// Removes all entries.
    pub async fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    /// Returns the number of entries in the cache.
    ///
    /// Expired entries are included.
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

//------------ Key -----------------------------------------------------------

/// The key for cache entries.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct Key {
    qclass: Class,
    qtype: Rtype,
    qname: Name,
}

impl<'a> From<&'a Question> for Key {
    fn from(question: &'a Question) -> Self {
        Key {
            qclass: question.qclass(),
            qtype: question.qtype(),
            qname: question.qname().clone(),
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rcode;
    use crate::base::message_builder::MessageBuilder;
    use crate::base::record::Record;
    use crate::rdata::A;
    use crate::resolv::clock::{Clock, FakeClock};
    use std::net::SocketAddr;
    use std::str::FromStr;
    use std::time::Duration;

    fn question(name: &str) -> Question {
        Question::new_in(Name::from_str(name).unwrap(), Rtype::A)
    }

    fn response(clock: &FakeClock, qname: &str, ttl: u32) -> Response {
        let request = MessageBuilder::request(1, question(qname), true)
            .into_message();
        let mut answer = MessageBuilder::start_answer(&request);
        answer
            .push_answer(Record::new_in(
                Name::from_str(qname).unwrap(),
                ttl,
                A::from_octets(192, 0, 2, 1),
            ))
            .unwrap();
        Response::new(
            answer.into_message(),
            SocketAddr::from(([127, 0, 0, 1], 53)),
            clock.now(),
        )
    }

    #[tokio::test]
    async fn hit_and_expiry() {
        let clock = FakeClock::new();
        let cache = ResponseCache::new(10);
        assert!(cache.insert(response(&clock, "example.com", 30)).await);

        // Names are compared case-insensitively.
        assert!(cache.get(&question("EXAMPLE.com")).await.is_some());
        assert!(cache.get(&question("example.net")).await.is_none());

        clock.adjust_time(Duration::from_secs(30));
        assert!(cache.get(&question("example.com")).await.is_none());
        assert_eq!(cache.len().await, 1);

        // A fresh response replaces the expired one.
        assert!(cache.insert(response(&clock, "example.com", 30)).await);
        assert!(cache.get(&question("example.com")).await.is_some());
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn only_successful_responses() {
        let clock = FakeClock::new();
        let cache = ResponseCache::new(10);
        assert!(!cache.insert(Response::timeout(clock.now())).await);

        let mut failed = response(&clock, "example.com", 30).into_message();
        failed.header_mut().set_rcode(Rcode::SERVFAIL);
        let failed = Response::new(
            failed,
            SocketAddr::from(([127, 0, 0, 1], 53)),
            clock.now(),
        );
        assert!(!cache.insert(failed).await);
        assert_eq!(cache.len().await, 0);
    }
}
