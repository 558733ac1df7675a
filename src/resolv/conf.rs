//! Resolver configuration
//!
//! The configuration of a stub resolver consists of the list of upstream
//! servers to query and a set of options that govern how queries are
//! performed. Both are collected in [`ResolvConf`].
//!
//! The configuration is modeled along the lines of glibc’s resolver and
//! can be read from a glibc-style `/etc/resolv.conf` file.

use crate::base::name::{self, Name};
use crate::utils::config::DefMinMax;
use std::io::{self, BufRead, Read};
use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};
use std::time::Duration;
use std::{error, fmt, fs};

//------------ Configuration Limits ------------------------------------------

/// How long to wait for a response from a single server.
pub const TIMEOUT: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_secs(5),
    Duration::from_secs(1),
    Duration::from_secs(3600),
);

/// How many times to go through the list of servers.
pub const RETRIES: DefMinMax<u8> = DefMinMax::new(3, 1, 20);

/// The maximum number of responses kept in the cache.
pub const CACHE_CAPACITY: DefMinMax<u64> = DefMinMax::new(1000, 1, 1_000_000);

/// The size of the receive buffer for datagram transports.
///
/// Queries are sent without EDNS, so responses never exceed this size.
pub const UDP_RECV_SIZE: usize = 512;

/// The port servers listen on unless told otherwise.
const DNS_PORT: u16 = 53;

//------------ ResolvOptions -------------------------------------------------

/// Options for the resolver configuration.
#[derive(Clone, Debug)]
pub struct ResolvOptions {
    /// Search list for host-name lookup.
    ///
    /// The list is kept for the configuration file’s sake. The resolver
    /// always queries names as given.
    pub search: Vec<Name>,

    /// Timeout to wait for a response from a server.
    pub timeout: Duration,

    /// Number of times to try every server before giving up.
    pub retries: u8,

    /// The transport protocol to use for all servers.
    pub transport: Transport,

    /// Set the recursion desired bit in queries.
    ///
    /// Enabled by default.
    pub recurse: bool,

    /// Keep successful responses in a cache.
    ///
    /// Enabled by default.
    pub use_cache: bool,

    /// The maximum number of responses kept in the cache.
    pub cache_capacity: u64,
}

impl ResolvOptions {
    /// Sets the timeout, clamped into the permitted range.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = TIMEOUT.limit(timeout)
    }

    /// Sets the number of retries, clamped into the permitted range.
    pub fn set_retries(&mut self, retries: u8) {
        self.retries = RETRIES.limit(retries)
    }

    /// Sets the cache capacity, clamped into the permitted range.
    pub fn set_cache_capacity(&mut self, capacity: u64) {
        self.cache_capacity = CACHE_CAPACITY.limit(capacity)
    }
}

impl Default for ResolvOptions {
    fn default() -> Self {
        ResolvOptions {
            search: Vec::new(),
            timeout: TIMEOUT.default(),
            retries: RETRIES.default(),
            transport: Transport::Udp,
            recurse: true,
            use_cache: true,
            cache_capacity: CACHE_CAPACITY.default(),
        }
    }
}

//------------ Transport -----------------------------------------------------

/// The transport protocol to be used for a server.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Transport {
    /// Unencrypted UDP transport.
    #[default]
    Udp,

    /// Unencrypted TCP transport.
    Tcp,
}

impl Transport {
    /// Returns whether the transport is a streaming protocol.
    pub fn is_stream(self) -> bool {
        match self {
            Transport::Udp => false,
            Transport::Tcp => true,
        }
    }
}

//------------ ServerConf ----------------------------------------------------

/// Configuration for one upstream DNS server.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConf {
    /// Server address.
    pub addr: SocketAddr,

    /// Transport protocol.
    pub transport: Transport,

    /// How long to wait for a response before returning a timeout error.
    pub request_timeout: Duration,

    /// Size of the message receive buffer in bytes.
    ///
    /// This is used for datagram transports only.
    pub recv_size: usize,
}

impl ServerConf {
    /// Returns a new default server config for the given address.
    pub fn new(addr: SocketAddr, transport: Transport) -> Self {
        ServerConf {
            addr,
            transport,
            request_timeout: TIMEOUT.default(),
            recv_size: UDP_RECV_SIZE,
        }
    }
}

//------------ ResolvConf ----------------------------------------------------

/// Resolver configuration.
///
/// This type collects all information necessary to configure how a stub
/// resolver talks to its upstream resolvers.
///
/// The type follows the builder pattern. After creating a value with
/// `ResolvConf::new()` you can manipulate the members. Once you are happy
/// with them, you call `finalize()` to make sure the configuration is valid.
///
/// Additionally, the type can parse a glibc-style configuration file,
/// commonly known as `/etc/resolv.conf` through the `parse()` and
/// `parse_file()` methods. You still need to call `finalize()` after
/// parsing.
///
/// The easiest way, however, to get the system resolver configuration is
/// through `ResolvConf::system_default()`. This will parse the
/// configuration file or return a default configuration if that fails.
#[derive(Clone, Debug, Default)]
pub struct ResolvConf {
    /// The servers to query in order.
    pub servers: Vec<ServerConf>,

    /// Default options.
    pub options: ResolvOptions,
}

/// # Management
///
impl ResolvConf {
    /// Creates a new, empty configuration.
    ///
    /// Using an empty configuration will fail since it does not contain
    /// any name servers. Call `self.finalize()` to make it usable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalizes the configuration for actual use.
    ///
    /// If `servers` is empty, `127.0.0.1:53` is added, which is exactly
    /// what glibc does. The options are then clamped into their permitted
    /// ranges and the timeout and transport are copied to all servers.
    pub fn finalize(&mut self) {
        if self.servers.is_empty() {
            let addr = SocketAddr::new(
                IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
                DNS_PORT,
            );
            self.servers.push(ServerConf::new(addr, self.options.transport));
        }
        self.options.set_timeout(self.options.timeout);
        self.options.set_retries(self.options.retries);
        self.options.set_cache_capacity(self.options.cache_capacity);
        for server in &mut self.servers {
            server.request_timeout = self.options.timeout;
            server.transport = self.options.transport;
        }
    }

    /// Creates a default configuration for this system.
    ///
    /// This currently only works for Unix-y systems. Elsewhere, and if the
    /// configuration file cannot be read, the configuration ends up
    /// pointing to localhost.
    pub fn system_default() -> Self {
        let mut res = ResolvConf::new();
        if let Err(err) = res.parse_file("/etc/resolv.conf") {
            tracing::debug!("cannot read /etc/resolv.conf: {}", err);
            res = ResolvConf::new();
        }
        res.finalize();
        res
    }

    /// Replaces the server list with the server given as a string.
    ///
    /// The string can be an IP address, an IP address with a port in
    /// socket address notation, or a host name which is then resolved
    /// through the system’s resolver. A host name may be followed by a
    /// colon and a port. If no port is given, 53 is used.
    ///
    /// Returns whether the string produced at least one server. If it
    /// didn’t, the configuration remains unchanged.
    pub fn set_server(&mut self, server: &str) -> bool {
        let addrs = resolve_server(server);
        if addrs.is_empty() {
            return false;
        }
        self.servers = addrs
            .into_iter()
            .map(|addr| self.server_conf(addr))
            .collect();
        true
    }

    /// Appends a server to the server list.
    pub fn add_server(&mut self, addr: SocketAddr) {
        let server = self.server_conf(addr);
        self.servers.push(server)
    }

    fn server_conf(&self, addr: SocketAddr) -> ServerConf {
        let mut res = ServerConf::new(addr, self.options.transport);
        res.request_timeout = self.options.timeout;
        res
    }
}

/// # Parsing Configuration File
///
impl ResolvConf {
    /// Parses the configuration from a file.
    pub fn parse_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<(), Error> {
        let mut file = fs::File::open(path)?;
        self.parse(&mut file)
    }

    /// Parses the configuration from a reader.
    ///
    /// The format is that of the /etc/resolv.conf file.
    pub fn parse<R: Read>(&mut self, reader: &mut R) -> Result<(), Error> {
        for line in io::BufReader::new(reader).lines() {
            let line = line?;
            let line = line.trim_end();

            if line.is_empty()
                || line.starts_with(';')
                || line.starts_with('#')
            {
                continue;
            }

            let mut words = line.split_whitespace();
            let keyword = words.next();
            match keyword {
                Some("nameserver") => self.parse_nameserver(words)?,
                Some("domain") => self.parse_domain(words)?,
                Some("search") => self.parse_search(words)?,
                Some("sortlist") => self.parse_sortlist(words)?,
                Some("options") => self.parse_options(words)?,
                _ => return Err(Error::ParseError),
            }
        }
        Ok(())
    }

    fn parse_nameserver(
        &mut self,
        mut words: SplitWhitespace,
    ) -> Result<(), Error> {
        for addr in (next_word(&mut words)?, DNS_PORT).to_socket_addrs()? {
            self.add_server(addr)
        }
        no_more_words(words)
    }

    fn parse_domain(
        &mut self,
        mut words: SplitWhitespace,
    ) -> Result<(), Error> {
        let domain = Name::from_str(next_word(&mut words)?)?;
        self.options.search = vec![domain];
        no_more_words(words)
    }

    fn parse_search(&mut self, words: SplitWhitespace) -> Result<(), Error> {
        let mut search = Vec::new();
        for word in words {
            search.push(Name::from_str(word)?)
        }
        self.options.search = search;
        Ok(())
    }

    fn parse_sortlist(
        &mut self,
        _words: SplitWhitespace,
    ) -> Result<(), Error> {
        // Addresses are returned in the order received.
        Ok(())
    }

    fn parse_options(&mut self, words: SplitWhitespace) -> Result<(), Error> {
        for word in words {
            match split_arg(word)? {
                ("timeout", Some(n)) => {
                    self.options.set_timeout(Duration::from_secs(n as u64))
                }
                ("attempts", Some(n)) => self
                    .options
                    .set_retries(u8::try_from(n).unwrap_or(u8::MAX)),
                ("use-vc", None) => self.options.transport = Transport::Tcp,
                ("no-recurse", None) => self.options.recurse = false,
                // Ignore unknown or misformated options.
                _ => {}
            }
        }
        Ok(())
    }
}

//--- Display

impl fmt::Display for ResolvConf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for server in &self.servers {
            let server = server.addr;
            f.write_str("nameserver ")?;
            if server.port() == DNS_PORT {
                writeln!(f, "{}", server.ip())?;
            } else {
                writeln!(f, "{}", server)?;
            }
        }
        match self.options.search.as_slice() {
            [] => {}
            [domain] => writeln!(f, "domain {}", domain)?,
            search => {
                f.write_str("search")?;
                for name in search {
                    write!(f, " {}", name)?;
                }
                writeln!(f)?;
            }
        }

        // Collect options so we only print them if there are any
        // non-default ones.
        let mut options = Vec::new();
        if self.options.timeout != TIMEOUT.default() {
            options
                .push(format!("timeout:{}", self.options.timeout.as_secs()));
        }
        if self.options.retries != RETRIES.default() {
            options.push(format!("attempts:{}", self.options.retries));
        }
        if self.options.transport.is_stream() {
            options.push("use-vc".into());
        }
        if !self.options.recurse {
            options.push("no-recurse".into());
        }
        if !options.is_empty() {
            f.write_str("options")?;
            for option in options {
                write!(f, " {}", option)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//------------ Private Helpers -----------------------------------------------

/// Returns a reference to the next word or an error.
fn next_word<'a>(words: &mut SplitWhitespace<'a>) -> Result<&'a str, Error> {
    match words.next() {
        Some(word) => Ok(word),
        None => Err(Error::ParseError),
    }
}

/// Returns nothing but errors out if there are words left.
fn no_more_words(mut words: SplitWhitespace) -> Result<(), Error> {
    match words.next() {
        Some(..) => Err(Error::ParseError),
        None => Ok(()),
    }
}

/// Splits the name and argument from an option with arguments.
///
/// These options consist of a name followed by a colon followed by a
/// value, which so far is only `usize`, so we do that.
fn split_arg(s: &str) -> Result<(&str, Option<usize>), Error> {
    match s.find(':') {
        Some(idx) => {
            let (left, right) = s.split_at(idx);
            Ok((left, Some(right[1..].parse()?)))
        }
        None => Ok((s, None)),
    }
}

/// Turns a server string into socket addresses.
fn resolve_server(server: &str) -> Vec<SocketAddr> {
    let server = server.trim();
    if let Ok(addr) = SocketAddr::from_str(server) {
        return vec![addr];
    }
    if let Ok(addr) = IpAddr::from_str(server) {
        return vec![SocketAddr::new(addr, DNS_PORT)];
    }
    let resolved = match server.rsplit_once(':') {
        Some((host, port)) => match port.parse::<u16>() {
            Ok(port) => (host, port).to_socket_addrs(),
            Err(_) => return Vec::new(),
        },
        None => (server, DNS_PORT).to_socket_addrs(),
    };
    match resolved {
        Ok(addrs) => addrs.collect(),
        Err(err) => {
            tracing::debug!("cannot resolve server '{}': {}", server, err);
            Vec::new()
        }
    }
}

//------------ Error ---------------------------------------------------------

/// The error that can happen when parsing `resolv.conf`.
#[derive(Debug)]
pub enum Error {
    /// The file is not a proper file.
    ParseError,

    /// Something happend while reading.
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}

impl From<name::FromStrError> for Error {
    fn from(_: name::FromStrError) -> Error {
        Error::ParseError
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(_: std::num::ParseIntError) -> Error {
        Error::ParseError
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ParseError => write!(f, "error parsing configuration"),
            Error::Io(ref e) => fmt::Display::fmt(e, f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::ParseError => None,
            Error::Io(ref e) => Some(e),
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_resolv_conf() {
        let mut conf = ResolvConf::new();
        let data = "# comment\n\
                    nameserver 192.0.2.0\n\
                    nameserver 192.0.2.1\n\
                    search example.com example.net\n\
                    sortlist 130.155.160.0/255.255.240.0 130.155.0.0\n\
                    options use-vc timeout:9 attempts:50 rotate\n";
        assert!(conf.parse(&mut io::Cursor::new(data)).is_ok());
        assert_eq!(conf.servers.len(), 2);
        assert_eq!(
            conf.servers[1].addr,
            SocketAddr::from(([192, 0, 2, 1], 53))
        );
        assert_eq!(conf.options.search.len(), 2);
        assert_eq!(conf.options.timeout, Duration::from_secs(9));
        assert_eq!(conf.options.retries, 20);
        assert_eq!(conf.options.transport, Transport::Tcp);

        conf.finalize();
        assert!(conf.servers.iter().all(|s| s.transport == Transport::Tcp));
        assert!(conf
            .servers
            .iter()
            .all(|s| s.request_timeout == Duration::from_secs(9)));
    }

    #[test]
    fn parse_errors() {
        let mut conf = ResolvConf::new();
        assert!(matches!(
            conf.parse(&mut io::Cursor::new("bogus 1.2.3.4\n")),
            Err(Error::ParseError)
        ));
        assert!(matches!(
            conf.parse(&mut io::Cursor::new("nameserver\n")),
            Err(Error::ParseError)
        ));
        assert!(matches!(
            conf.parse(&mut io::Cursor::new("options timeout:x\n")),
            Err(Error::ParseError)
        ));
    }

    #[test]
    fn finalize_empty() {
        let mut conf = ResolvConf::new();
        conf.options.retries = 0;
        conf.finalize();
        assert_eq!(conf.servers.len(), 1);
        assert_eq!(
            conf.servers[0].addr,
            SocketAddr::from(([127, 0, 0, 1], 53))
        );
        assert_eq!(conf.options.retries, 1);
    }

    #[test]
    fn set_server() {
        let mut conf = ResolvConf::new();
        assert!(conf.set_server("192.0.2.53"));
        assert_eq!(
            conf.servers[0].addr,
            SocketAddr::from(([192, 0, 2, 53], 53))
        );
        assert!(conf.set_server("192.0.2.1:5353"));
        assert_eq!(conf.servers.len(), 1);
        assert_eq!(conf.servers[0].addr.port(), 5353);
        assert!(conf.set_server("[2001:db8::1]:53"));
        assert!(conf.servers[0].addr.is_ipv6());

        assert!(!conf.set_server("192.0.2.1:notaport"));
        assert!(conf.servers[0].addr.is_ipv6());
    }

    #[test]
    fn display() {
        let mut conf = ResolvConf::new();
        conf.add_server(SocketAddr::from(([192, 0, 2, 1], 53)));
        conf.add_server(SocketAddr::from(([192, 0, 2, 2], 5353)));
        conf.options.search = vec![Name::from_str("example.com").unwrap()];
        conf.options.recurse = false;
        assert_eq!(
            conf.to_string(),
            "nameserver 192.0.2.1\n\
             nameserver 192.0.2.2:5353\n\
             domain example.com.\n\
             options no-recurse\n"
        );
    }
}
