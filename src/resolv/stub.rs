//! A stub resolver.
//!
//! The most simple resolver possible simply relays all messages to one of a
//! set of pre-configured resolvers that will do the actual work. This is
//! equivalent to what the resolver part of the C library does. This module
//! provides such a stub resolver that emulates this C resolver as closely
//! as possible, in particular in the way it is being configured.
//!
//! The main type is [`StubResolver`]. Its [`query`][StubResolver::query]
//! method asks a single question and returns whatever came back. A number
//! of lookup methods provide the most common questions in a more
//! convenient form.

use super::cache::ResponseCache;
use super::clock::{Clock, SystemClock};
use super::conf::{ResolvConf, ResolvOptions, ServerConf, Transport};
use super::response::Response;
use super::{tcp, udp};
use crate::base::iana::{Class, Rtype};
use crate::base::message_builder::MessageBuilder;
use crate::base::name::Name;
use crate::base::question::Question;
use crate::rdata::{Mx, Srv};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
#[cfg(feature = "resolv-sync")]
use std::{future::Future, io};
#[cfg(feature = "resolv-sync")]
use tokio::runtime;
use tracing::{debug, trace, warn};

//------------ StubResolver --------------------------------------------------

/// A DNS stub resolver.
///
/// This type collects all information making it possible to start DNS
/// queries. You can create a new resolver using the system’s configuration
/// using the [`new()`] associate function or using your own configuration
/// with [`from_conf()`].
///
/// Stub resolver values can be cloned cheaply as they keep all information
/// behind an arc. Clones share the cache and the message ID counter.
///
/// Queries first consult the cache. If there is no usable entry, every
/// configured server is tried in order, and the whole list is gone
/// through as many times as the configured number of retries. The first
/// response received from any server is returned. If none responds, the
/// result is a response that carries the error `"Timeout Error"`.
///
/// If you want to run a single query or lookup on a resolver synchronously,
/// you can do so simply by using the [`run()`] or [`run_with_conf()`]
/// associated functions.
///
/// The clock type parameter allows tests to control the passing of time
/// for the cache.
///
/// [`new()`]: #method.new
/// [`from_conf()`]: #method.from_conf
/// [`run()`]: #method.run
/// [`run_with_conf()`]: #method.run_with_conf
#[derive(Clone, Debug)]
pub struct StubResolver<C: Clock = SystemClock> {
    inner: Arc<Inner<C>>,
}

#[derive(Debug)]
struct Inner<C> {
    /// The servers to query in order.
    servers: Vec<ServerConf>,

    /// Resolver options.
    options: ResolvOptions,

    /// The response cache if caching is enabled.
    cache: Option<ResponseCache>,

    /// The message ID for the next request.
    next_id: AtomicU16,

    /// Where to get the time from.
    clock: C,
}

impl StubResolver {
    /// Creates a new resolver using the system’s default configuration.
    pub fn new() -> Self {
        Self::from_conf(ResolvConf::system_default())
    }

    /// Creates a new resolver using the given configuration.
    pub fn from_conf(conf: ResolvConf) -> Self {
        Self::with_clock(conf, SystemClock::new())
    }
}

impl<C: Clock> StubResolver<C> {
    /// Creates a new resolver using the given configuration and clock.
    ///
    /// The configuration is finalized first.
    pub fn with_clock(mut conf: ResolvConf, clock: C) -> Self {
        conf.finalize();
        let cache = if conf.options.use_cache {
            Some(ResponseCache::new(conf.options.cache_capacity))
        } else {
            None
        };
        StubResolver {
            inner: Arc::new(Inner {
                servers: conf.servers,
                options: conf.options,
                cache,
                next_id: AtomicU16::new(rand::random()),
                clock,
            }),
        }
    }

    /// Returns the resolver options.
    pub fn options(&self) -> &ResolvOptions {
        &self.inner.options
    }

    /// Returns the servers in the order they are tried.
    pub fn servers(&self) -> &[ServerConf] {
        &self.inner.servers
    }

    /// Asks a question.
    ///
    /// This never fails. If no server could be reached, the returned
    /// response carries an error. Responses with an rcode other than
    /// NOERROR are returned as they are.
    pub async fn query(&self, question: Question) -> Response {
        if let Some(cache) = self.inner.cache.as_ref() {
            if let Some(response) = cache.get(&question).await {
                debug!("answering {} from cache", question);
                return response;
            }
        }
        let response = self.query_servers(&question).await;
        if let Some(cache) = self.inner.cache.as_ref() {
            cache.insert(response.clone()).await;
        }
        response
    }

    /// Runs through the servers until one of them answers.
    async fn query_servers(&self, question: &Question) -> Response {
        let options = &self.inner.options;
        for attempt in 1..=options.retries {
            for server in &self.inner.servers {
                let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
                let request = MessageBuilder::request(
                    id,
                    question.clone(),
                    options.recurse,
                )
                .into_message();
                trace!(
                    "attempt {}: asking {} for {} with id {}",
                    attempt,
                    server.addr,
                    question,
                    id
                );
                let res = match server.transport {
                    Transport::Udp => udp::query(&request, server).await,
                    Transport::Tcp => tcp::query(&request, server).await,
                };
                match res {
                    Ok(message) => {
                        debug!(
                            "received {} from {} for {}",
                            message.rcode(),
                            server.addr,
                            question
                        );
                        return Response::new(
                            message,
                            server.addr,
                            self.inner.clock.now(),
                        );
                    }
                    Err(err) if err.is_timeout() => {
                        debug!("server {} timed out", server.addr)
                    }
                    Err(err) => warn!("server {} failed: {}", server.addr, err),
                }
            }
        }
        warn!("no server answered the question for {}", question);
        Response::timeout(self.inner.clock.now())
    }

    /// Removes all responses from the cache.
    pub async fn clear_cache(&self) {
        if let Some(cache) = self.inner.cache.as_ref() {
            cache.clear().await
        }
    }

    /// Returns the number of responses in the cache.
    pub async fn cache_len(&self) -> u64 {
        match self.inner.cache.as_ref() {
            Some(cache) => cache.len().await,
            None => 0,
        }
    }
}

/// # Lookups
///
/// These methods ask the common questions and extract the interesting
/// part of the answer. If the question could not be answered, the result
/// is empty.
impl<C: Clock> StubResolver<C> {
    /// Returns the IPv4 and IPv6 addresses of a host.
    ///
    /// The IPv4 addresses come first.
    pub async fn lookup_host(&self, qname: &Name) -> Vec<IpAddr> {
        let (a, aaaa) = tokio::join!(
            self.query(Question::new_in(qname.clone(), Rtype::A)),
            self.query(Question::new_in(qname.clone(), Rtype::AAAA)),
        );
        a.a_records()
            .into_iter()
            .map(IpAddr::V4)
            .chain(aaaa.aaaa_records().into_iter().map(IpAddr::V6))
            .collect()
    }

    /// Returns the host names for an IP address.
    pub async fn lookup_addr(&self, addr: IpAddr) -> Vec<Name> {
        let qname = Name::reverse_from_addr(addr);
        self.query(Question::new_in(qname, Rtype::PTR))
            .await
            .ptr_names()
    }

    /// Returns the mail exchangers of a domain ordered by preference.
    pub async fn lookup_mx(&self, qname: &Name) -> Vec<Mx> {
        self.query(Question::new_in(qname.clone(), Rtype::MX))
            .await
            .mx_records()
    }

    /// Returns the servers for a service ordered by priority and weight.
    ///
    /// The name is the full service name, e.g., `_ldap._tcp.example.com`.
    pub async fn lookup_srv(&self, qname: &Name) -> Vec<Srv> {
        self.query(Question::new(qname.clone(), Rtype::SRV, Class::IN))
            .await
            .srv_records()
    }
}

#[cfg(feature = "resolv-sync")]
#[cfg_attr(docsrs, doc(cfg(feature = "resolv-sync")))]
impl<C: Clock> StubResolver<C> {
    /// Asks a question synchronously.
    ///
    /// This creates a runtime for the duration of the query. It must not
    /// be called from within an async runtime.
    pub fn query_sync(&self, question: Question) -> Response {
        match current_thread_runtime() {
            Ok(runtime) => runtime.block_on(self.query(question)),
            Err(err) => {
                warn!("cannot create runtime: {}", err);
                Response::failed(err.to_string(), self.inner.clock.now())
            }
        }
    }
}

#[cfg(feature = "resolv-sync")]
#[cfg_attr(docsrs, doc(cfg(feature = "resolv-sync")))]
impl StubResolver {
    /// Synchronously perform a DNS operation atop a standard resolver.
    ///
    /// This associated functions removes almost all boiler plate for the
    /// case that you want to perform some DNS operation, either a query or
    /// lookup, on a resolver using the system’s configuration and wait for
    /// the result.
    ///
    /// The only argument is a closure taking a `StubResolver` and returning
    /// a future. Whatever that future resolves to will be returned. An error
    /// is only returned if the runtime cannot be created.
    pub fn run<R, F>(op: F) -> Result<R::Output, io::Error>
    where
        R: Future + Send + 'static,
        R::Output: Send + 'static,
        F: FnOnce(StubResolver) -> R + Send + 'static,
    {
        Self::run_with_conf(ResolvConf::system_default(), op)
    }

    /// Synchronously perform a DNS operation atop a configured resolver.
    ///
    /// This is like [`run()`] but also takes a resolver configuration for
    /// tailor-making your own resolver.
    ///
    /// [`run()`]: #method.run
    pub fn run_with_conf<R, F>(
        conf: ResolvConf,
        op: F,
    ) -> Result<R::Output, io::Error>
    where
        R: Future + Send + 'static,
        R::Output: Send + 'static,
        F: FnOnce(StubResolver) -> R + Send + 'static,
    {
        let resolver = Self::from_conf(conf);
        Ok(current_thread_runtime()?.block_on(op(resolver)))
    }
}

#[cfg(feature = "resolv-sync")]
fn current_thread_runtime() -> Result<runtime::Runtime, io::Error> {
    runtime::Builder::new_current_thread().enable_all().build()
}

impl Default for StubResolver {
    fn default() -> Self {
        Self::new()
    }
}

//============ Testing =======================================================
