// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Traffic selectors: predicates over packet header fields.

use crate::device::PortNumber;
use crate::eth::{Mac, Vid};
use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Ethertype of IPv4
pub const ETH_TYPE_IPV4: u16 = 0x0800;
/// Ethertype of ARP
pub const ETH_TYPE_ARP: u16 = 0x0806;
/// Ethertype of IPv6
pub const ETH_TYPE_IPV6: u16 = 0x86dd;

/// The header field a [`Criterion`] matches on. Selectors hold at most one criterion per type.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CriterionType {
    /// Ingress port
    InPort,
    /// Destination MAC address
    EthDst,
    /// Source MAC address
    EthSrc,
    /// Ethertype
    EthType,
    /// VLAN id
    VlanVid,
    /// IP protocol number
    IpProto,
    /// Source IPv4 prefix
    #[strum(serialize = "IPV4_SRC")]
    Ipv4Src,
    /// Destination IPv4 prefix
    #[strum(serialize = "IPV4_DST")]
    Ipv4Dst,
    /// Source IPv6 prefix
    #[strum(serialize = "IPV6_SRC")]
    Ipv6Src,
    /// Destination IPv6 prefix
    #[strum(serialize = "IPV6_DST")]
    Ipv6Dst,
    /// TCP source port
    TcpSrc,
    /// TCP destination port
    TcpDst,
    /// UDP source port
    UdpSrc,
    /// UDP destination port
    UdpDst,
}

/// A single match condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    /// Ingress port
    InPort(PortNumber),
    /// Destination MAC address
    EthDst(Mac),
    /// Source MAC address
    EthSrc(Mac),
    /// Ethertype
    EthType(u16),
    /// VLAN id
    VlanVid(Vid),
    /// IP protocol number
    IpProto(u8),
    /// Source IPv4 prefix
    Ipv4Src(Ipv4Net),
    /// Destination IPv4 prefix
    Ipv4Dst(Ipv4Net),
    /// Source IPv6 prefix
    Ipv6Src(Ipv6Net),
    /// Destination IPv6 prefix
    Ipv6Dst(Ipv6Net),
    /// TCP source port
    TcpSrc(u16),
    /// TCP destination port
    TcpDst(u16),
    /// UDP source port
    UdpSrc(u16),
    /// UDP destination port
    UdpDst(u16),
}

impl Criterion {
    /// The header field this criterion applies to.
    #[must_use]
    pub const fn criterion_type(&self) -> CriterionType {
        match self {
            Criterion::InPort(_) => CriterionType::InPort,
            Criterion::EthDst(_) => CriterionType::EthDst,
            Criterion::EthSrc(_) => CriterionType::EthSrc,
            Criterion::EthType(_) => CriterionType::EthType,
            Criterion::VlanVid(_) => CriterionType::VlanVid,
            Criterion::IpProto(_) => CriterionType::IpProto,
            Criterion::Ipv4Src(_) => CriterionType::Ipv4Src,
            Criterion::Ipv4Dst(_) => CriterionType::Ipv4Dst,
            Criterion::Ipv6Src(_) => CriterionType::Ipv6Src,
            Criterion::Ipv6Dst(_) => CriterionType::Ipv6Dst,
            Criterion::TcpSrc(_) => CriterionType::TcpSrc,
            Criterion::TcpDst(_) => CriterionType::TcpDst,
            Criterion::UdpSrc(_) => CriterionType::UdpSrc,
            Criterion::UdpDst(_) => CriterionType::UdpDst,
        }
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.criterion_type())?;
        match self {
            Criterion::InPort(port) => write!(f, "{port}"),
            Criterion::EthDst(mac) | Criterion::EthSrc(mac) => write!(f, "{mac}"),
            Criterion::EthType(ethtype) => write!(f, "{ethtype:#x}"),
            Criterion::VlanVid(vid) => write!(f, "{vid}"),
            Criterion::IpProto(proto) => write!(f, "{proto}"),
            Criterion::Ipv4Src(prefix) | Criterion::Ipv4Dst(prefix) => write!(f, "{prefix}"),
            Criterion::Ipv6Src(prefix) | Criterion::Ipv6Dst(prefix) => write!(f, "{prefix}"),
            Criterion::TcpSrc(port)
            | Criterion::TcpDst(port)
            | Criterion::UdpSrc(port)
            | Criterion::UdpDst(port) => write!(f, "{port}"),
        }
    }
}

/// A set of [`Criterion`]s that a packet must all satisfy. The empty selector matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Criterion>", into = "Vec<Criterion>")]
pub struct TrafficSelector {
    criteria: BTreeMap<CriterionType, Criterion>,
}

impl TrafficSelector {
    /// A selector without criteria.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a selector.
    #[must_use]
    pub fn builder() -> TrafficSelectorBuilder {
        TrafficSelectorBuilder::default()
    }

    /// Criteria, ordered by [`CriterionType`]
    pub fn criteria(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.values()
    }

    /// Get the criterion for a header field, if any.
    #[must_use]
    pub fn get(&self, ctype: CriterionType) -> Option<&Criterion> {
        self.criteria.get(&ctype)
    }

    /// Number of criteria
    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Tells if this selector matches every packet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl From<Vec<Criterion>> for TrafficSelector {
    fn from(criteria: Vec<Criterion>) -> Self {
        criteria
            .into_iter()
            .fold(TrafficSelector::builder(), TrafficSelectorBuilder::add)
            .build()
    }
}

impl From<TrafficSelector> for Vec<Criterion> {
    fn from(selector: TrafficSelector) -> Self {
        selector.criteria.into_values().collect()
    }
}

impl Display for TrafficSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrafficSelector{{criteria=[")?;
        for (n, criterion) in self.criteria().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{criterion}")?;
        }
        write!(f, "]}}")
    }
}

/// Accumulates criteria for a [`TrafficSelector`]. A criterion replaces any earlier one of the
/// same [`CriterionType`].
#[derive(Clone, Debug, Default)]
pub struct TrafficSelectorBuilder {
    criteria: BTreeMap<CriterionType, Criterion>,
}

impl TrafficSelectorBuilder {
    /// Add `criterion`, replacing any criterion on the same header field.
    #[must_use]
    pub fn add(mut self, criterion: Criterion) -> Self {
        self.criteria.insert(criterion.criterion_type(), criterion);
        self
    }
    /// Match on the ingress port.
    #[must_use]
    pub fn match_in_port(self, port: PortNumber) -> Self {
        self.add(Criterion::InPort(port))
    }
    /// Match on the source MAC.
    #[must_use]
    pub fn match_eth_src(self, mac: Mac) -> Self {
        self.add(Criterion::EthSrc(mac))
    }
    /// Match on the destination MAC.
    #[must_use]
    pub fn match_eth_dst(self, mac: Mac) -> Self {
        self.add(Criterion::EthDst(mac))
    }
    /// Match on the ethertype.
    #[must_use]
    pub fn match_eth_type(self, ethtype: u16) -> Self {
        self.add(Criterion::EthType(ethtype))
    }
    /// Match on the VLAN id.
    #[must_use]
    pub fn match_vlan_id(self, vid: Vid) -> Self {
        self.add(Criterion::VlanVid(vid))
    }
    /// Match on the IP protocol.
    #[must_use]
    pub fn match_ip_proto(self, proto: u8) -> Self {
        self.add(Criterion::IpProto(proto))
    }
    /// Match on the source IPv4 prefix.
    #[must_use]
    pub fn match_ipv4_src(self, prefix: Ipv4Net) -> Self {
        self.add(Criterion::Ipv4Src(prefix))
    }
    /// Match on the destination IPv4 prefix.
    #[must_use]
    pub fn match_ipv4_dst(self, prefix: Ipv4Net) -> Self {
        self.add(Criterion::Ipv4Dst(prefix))
    }
    /// Match on the source IPv6 prefix.
    #[must_use]
    pub fn match_ipv6_src(self, prefix: Ipv6Net) -> Self {
        self.add(Criterion::Ipv6Src(prefix))
    }
    /// Match on the destination IPv6 prefix.
    #[must_use]
    pub fn match_ipv6_dst(self, prefix: Ipv6Net) -> Self {
        self.add(Criterion::Ipv6Dst(prefix))
    }
    /// Match on the TCP source port.
    #[must_use]
    pub fn match_tcp_src(self, port: u16) -> Self {
        self.add(Criterion::TcpSrc(port))
    }
    /// Match on the TCP destination port.
    #[must_use]
    pub fn match_tcp_dst(self, port: u16) -> Self {
        self.add(Criterion::TcpDst(port))
    }
    /// Match on the UDP source port.
    #[must_use]
    pub fn match_udp_src(self, port: u16) -> Self {
        self.add(Criterion::UdpSrc(port))
    }
    /// Match on the UDP destination port.
    #[must_use]
    pub fn match_udp_dst(self, port: u16) -> Self {
        self.add(Criterion::UdpDst(port))
    }
    /// Finish the selector.
    #[must_use]
    pub fn build(self) -> TrafficSelector {
        TrafficSelector {
            criteria: self.criteria,
        }
    }
}
