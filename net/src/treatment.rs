// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Traffic treatments: the actions applied to packets matched by a selector.

use crate::device::PortNumber;
use crate::eth::{Mac, Vid};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::net::Ipv4Addr;

/// A single action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Forward out of a port.
    Output(PortNumber),
    /// Drop the packet.
    NoAction,
    /// Rewrite the source MAC.
    SetEthSrc(Mac),
    /// Rewrite the destination MAC.
    SetEthDst(Mac),
    /// Rewrite the VLAN id of the outer tag.
    SetVlanId(Vid),
    /// Push a new VLAN tag.
    PushVlan,
    /// Pop the outer VLAN tag.
    PopVlan,
    /// Rewrite the source IPv4 address.
    SetIpv4Src(Ipv4Addr),
    /// Rewrite the destination IPv4 address.
    SetIpv4Dst(Ipv4Addr),
    /// Enqueue on the given queue of the output port.
    SetQueue(u64),
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Output(port) => write!(f, "OUTPUT:{port}"),
            Instruction::NoAction => write!(f, "NOACTION"),
            Instruction::SetEthSrc(mac) => write!(f, "L2MODIFICATION:ETH_SRC:{mac}"),
            Instruction::SetEthDst(mac) => write!(f, "L2MODIFICATION:ETH_DST:{mac}"),
            Instruction::SetVlanId(vid) => write!(f, "L2MODIFICATION:VLAN_ID:{vid}"),
            Instruction::PushVlan => write!(f, "L2MODIFICATION:VLAN_PUSH"),
            Instruction::PopVlan => write!(f, "L2MODIFICATION:VLAN_POP"),
            Instruction::SetIpv4Src(ip) => write!(f, "L3MODIFICATION:IPV4_SRC:{ip}"),
            Instruction::SetIpv4Dst(ip) => write!(f, "L3MODIFICATION:IPV4_DST:{ip}"),
            Instruction::SetQueue(queue) => write!(f, "QUEUE:{queue}"),
        }
    }
}

/// Ordered instructions applied immediately, a deferred set written to the packet's action set,
/// an optional jump to another table and whether the deferred set is cleared first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrafficTreatment {
    immediate: Vec<Instruction>,
    deferred: Vec<Instruction>,
    transition: Option<u32>,
    cleared: bool,
}

impl TrafficTreatment {
    /// A treatment without instructions.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a treatment.
    #[must_use]
    pub fn builder() -> TrafficTreatmentBuilder {
        TrafficTreatmentBuilder::default()
    }

    /// Instructions applied right away, in order
    #[must_use]
    pub fn immediate(&self) -> &[Instruction] {
        &self.immediate
    }

    /// Instructions written to the action set
    #[must_use]
    pub fn deferred(&self) -> &[Instruction] {
        &self.deferred
    }

    /// Every instruction, immediate first.
    pub fn all_instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.immediate.iter().chain(self.deferred.iter())
    }

    /// Table to continue processing in, if any
    #[must_use]
    pub const fn table_transition(&self) -> Option<u32> {
        self.transition
    }

    /// Tells if the action set is cleared before deferred instructions are written
    #[must_use]
    pub const fn clears_deferred(&self) -> bool {
        self.cleared
    }

    /// Tells if this treatment does nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty()
            && self.deferred.is_empty()
            && self.transition.is_none()
            && !self.cleared
    }
}

fn fmt_instructions(f: &mut std::fmt::Formatter<'_>, list: &[Instruction]) -> std::fmt::Result {
    write!(f, "[")?;
    for (n, instruction) in list.iter().enumerate() {
        if n > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{instruction}")?;
    }
    write!(f, "]")
}

impl Display for TrafficTreatment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrafficTreatment{{immediate=")?;
        fmt_instructions(f, &self.immediate)?;
        write!(f, ", deferred=")?;
        fmt_instructions(f, &self.deferred)?;
        match self.transition {
            Some(table) => write!(f, ", transition=TABLE:{table}")?,
            None => write!(f, ", transition=None")?,
        }
        write!(f, ", cleared={}}}", self.cleared)
    }
}

/// Accumulates instructions for a [`TrafficTreatment`].
///
/// Instructions go to the immediate list until [`TrafficTreatmentBuilder::deferred`] is called;
/// [`TrafficTreatmentBuilder::immediate`] switches back.
#[derive(Clone, Debug, Default)]
pub struct TrafficTreatmentBuilder {
    treatment: TrafficTreatment,
    defer: bool,
}

impl TrafficTreatmentBuilder {
    /// Append `instruction` to the current list.
    #[must_use]
    pub fn add(mut self, instruction: Instruction) -> Self {
        if self.defer {
            self.treatment.deferred.push(instruction);
        } else {
            self.treatment.immediate.push(instruction);
        }
        self
    }
    /// Subsequent instructions are deferred.
    #[must_use]
    pub fn deferred(mut self) -> Self {
        self.defer = true;
        self
    }
    /// Subsequent instructions are immediate.
    #[must_use]
    pub fn immediate(mut self) -> Self {
        self.defer = false;
        self
    }
    /// Forward out of `port`.
    #[must_use]
    pub fn set_output(self, port: PortNumber) -> Self {
        self.add(Instruction::Output(port))
    }
    /// Drop matched traffic. Discards previously accumulated immediate instructions.
    #[must_use]
    pub fn drop(mut self) -> Self {
        self.treatment.immediate.clear();
        self.add(Instruction::NoAction)
    }
    /// Rewrite the source MAC.
    #[must_use]
    pub fn set_eth_src(self, mac: Mac) -> Self {
        self.add(Instruction::SetEthSrc(mac))
    }
    /// Rewrite the destination MAC.
    #[must_use]
    pub fn set_eth_dst(self, mac: Mac) -> Self {
        self.add(Instruction::SetEthDst(mac))
    }
    /// Rewrite the VLAN id.
    #[must_use]
    pub fn set_vlan_id(self, vid: Vid) -> Self {
        self.add(Instruction::SetVlanId(vid))
    }
    /// Push a VLAN tag.
    #[must_use]
    pub fn push_vlan(self) -> Self {
        self.add(Instruction::PushVlan)
    }
    /// Pop the outer VLAN tag.
    #[must_use]
    pub fn pop_vlan(self) -> Self {
        self.add(Instruction::PopVlan)
    }
    /// Rewrite the source IPv4 address.
    #[must_use]
    pub fn set_ipv4_src(self, ip: Ipv4Addr) -> Self {
        self.add(Instruction::SetIpv4Src(ip))
    }
    /// Rewrite the destination IPv4 address.
    #[must_use]
    pub fn set_ipv4_dst(self, ip: Ipv4Addr) -> Self {
        self.add(Instruction::SetIpv4Dst(ip))
    }
    /// Enqueue on `queue`.
    #[must_use]
    pub fn set_queue(self, queue: u64) -> Self {
        self.add(Instruction::SetQueue(queue))
    }
    /// Continue processing in `table`.
    #[must_use]
    pub fn transition(mut self, table: u32) -> Self {
        self.treatment.transition = Some(table);
        self
    }
    /// Clear the action set before writing deferred instructions.
    #[must_use]
    pub fn wipe_deferred(mut self) -> Self {
        self.treatment.cleared = true;
        self
    }
    /// Finish the treatment.
    #[must_use]
    pub fn build(self) -> TrafficTreatment {
        self.treatment
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // valid in tests
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_treatment_display() {
        assert_eq!(
            TrafficTreatment::empty().to_string(),
            "TrafficTreatment{immediate=[], deferred=[], transition=None, cleared=false}"
        );
        assert!(TrafficTreatment::empty().is_empty());
    }

    #[test]
    fn wiping_deferred_is_not_empty() {
        let treatment = TrafficTreatment::builder().wipe_deferred().build();
        assert!(treatment.clears_deferred());
        assert!(!treatment.is_empty());
        assert_ne!(treatment, TrafficTreatment::empty());
    }

    #[test]
    fn immediate_and_deferred() {
        let treatment = TrafficTreatment::builder()
            .push_vlan()
            .set_vlan_id(Vid::new(100).unwrap())
            .deferred()
            .set_output(PortNumber::new(2))
            .immediate()
            .set_queue(1)
            .transition(3)
            .build();
        assert_eq!(
            treatment.immediate(),
            &[
                Instruction::PushVlan,
                Instruction::SetVlanId(Vid::new(100).unwrap()),
                Instruction::SetQueue(1),
            ]
        );
        assert_eq!(treatment.deferred(), &[Instruction::Output(PortNumber::new(2))]);
        assert_eq!(treatment.all_instructions().count(), 4);
        assert_eq!(
            treatment.to_string(),
            "TrafficTreatment{immediate=[L2MODIFICATION:VLAN_PUSH, L2MODIFICATION:VLAN_ID:100, QUEUE:1], \
             deferred=[OUTPUT:2], transition=TABLE:3, cleared=false}"
        );
    }

    #[test]
    fn drop_discards_immediate() {
        let treatment = TrafficTreatment::builder()
            .set_output(PortNumber::CONTROLLER)
            .drop()
            .build();
        assert_eq!(treatment.immediate(), &[Instruction::NoAction]);
        assert!(treatment.to_string().contains("NOACTION"));
    }
}
