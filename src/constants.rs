//! AX.25 protocol constants as published by Linux `<linux/ax25.h>` and `<netax25/ax25.h>`.
//!
//! Each value is available as a `pub const` and through the [`CONSTANTS`] table, which
//! host bindings can walk to export everything by name.

/// Address/protocol family.
pub const AF_AX25: u16 = 3;
pub const PF_AX25: u16 = AF_AX25;
/// Socket option level.
pub const SOL_AX25: i32 = 257;

pub const AX25_MTU: usize = 256;
/// Most digipeaters a socket address (and a frame) may carry.
pub const AX25_MAX_DIGIS: usize = 8;

// setsockopt(SOL_AX25, ...)
pub const AX25_WINDOW: i32 = 1;
pub const AX25_T1: i32 = 2;
pub const AX25_N2: i32 = 3;
pub const AX25_T3: i32 = 4;
pub const AX25_T2: i32 = 5;
pub const AX25_BACKOFF: i32 = 6;
pub const AX25_EXTSEQ: i32 = 7;
pub const AX25_PIDINCL: i32 = 8;
pub const AX25_IDLE: i32 = 9;
pub const AX25_PACLEN: i32 = 10;
pub const AX25_IAMDIGI: i32 = 12;
pub const AX25_KILL: i32 = 99;

// Link defaults. Timers in milliseconds.
pub const AX25_DEF_IPDEFMODE: i32 = 0;
pub const AX25_DEF_AXDEFMODE: i32 = 0;
pub const AX25_DEF_BACKOFF: i32 = 1;
pub const AX25_DEF_CONMODE: i32 = 2;
pub const AX25_DEF_WINDOW: i32 = 2;
pub const AX25_DEF_EWINDOW: i32 = 32;
pub const AX25_DEF_T1: i32 = 10_000;
pub const AX25_DEF_T2: i32 = 3_000;
pub const AX25_DEF_T3: i32 = 300_000;
pub const AX25_DEF_N2: i32 = 10;
pub const AX25_DEF_IDLE: i32 = 0;
pub const AX25_DEF_PACLEN: i32 = 256;
pub const AX25_DEF_DS_TIMEOUT: i32 = 180_000;

// Backoff modes
pub const AX25_BACKOFF_NONE: i32 = 0;
pub const AX25_BACKOFF_LINEAR: i32 = 1;
pub const AX25_BACKOFF_EXPONENTIAL: i32 = 2;

// Digipeater mode flags
pub const AX25_DIGI_INBAND: i32 = 0x01;
pub const AX25_DIGI_XBAND: i32 = 0x02;

// UID policy
pub const AX25_NOUID_DEFAULT: i32 = 0;
pub const AX25_NOUID_BLOCK: i32 = 1;

pub const AX25_SET_RT_IPMODE: i32 = 2;

// ioctl numbers (SIOCPROTOPRIVATE = 0x89E0)
pub const SIOCAX25GETUID: u32 = 0x89E0;
pub const SIOCAX25ADDUID: u32 = 0x89E1;
pub const SIOCAX25DELUID: u32 = 0x89E2;
pub const SIOCAX25NOUID: u32 = 0x89E3;
pub const SIOCAX25OPTRT: u32 = 0x89E7;
pub const SIOCAX25CTLCON: u32 = 0x89E8;
pub const SIOCAX25GETINFOOLD: u32 = 0x89E9;
pub const SIOCAX25ADDFWD: u32 = 0x89EA;
pub const SIOCAX25DELFWD: u32 = 0x89EB;
pub const SIOCAX25DEVCTL: u32 = 0x89EC;
pub const SIOCAX25GETINFO: u32 = 0x89ED;

// Protocol identifiers
pub const AX25_P_ROSE: u8 = 0x01;
pub const AX25_P_VJCOMP: u8 = 0x06;
pub const AX25_P_VJUNCOMP: u8 = 0x07;
pub const AX25_P_SEGMENT: u8 = 0x08;
pub const AX25_P_TEXNET: u8 = 0xC3;
pub const AX25_P_LQ: u8 = 0xC4;
pub const AX25_P_ATALK: u8 = 0xCA;
pub const AX25_P_ATALK_ARP: u8 = 0xCB;
pub const AX25_P_IP: u8 = 0xCC;
pub const AX25_P_ARP: u8 = 0xCD;
pub const AX25_P_FLEXNET: u8 = 0xCE;
pub const AX25_P_NETROM: u8 = 0xCF;
pub const AX25_P_TEXT: u8 = 0xF0;

/// Which part of the socket API a constant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantGroup {
    Family,
    Limit,
    SocketOption,
    Default,
    Backoff,
    Digipeater,
    Uid,
    Routing,
    Ioctl,
    ProtocolId,
}

/// One named constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    pub name: &'static str,
    pub value: i64,
    pub group: ConstantGroup,
}

macro_rules! table {
    ($( $group:ident : [ $($name:ident),* $(,)? ] ),* $(,)?) => {
        &[ $( $( Constant {
            name: stringify!($name),
            value: $name as i64,
            group: ConstantGroup::$group,
        }, )* )* ]
    };
}

/// Every exported constant, grouped.
pub static CONSTANTS: &[Constant] = table! {
    Family: [AF_AX25, PF_AX25, SOL_AX25],
    Limit: [AX25_MTU, AX25_MAX_DIGIS],
    SocketOption: [
        AX25_WINDOW, AX25_T1, AX25_N2, AX25_T3, AX25_T2, AX25_BACKOFF, AX25_EXTSEQ,
        AX25_PIDINCL, AX25_IDLE, AX25_PACLEN, AX25_IAMDIGI, AX25_KILL,
    ],
    Default: [
        AX25_DEF_IPDEFMODE, AX25_DEF_AXDEFMODE, AX25_DEF_BACKOFF, AX25_DEF_CONMODE,
        AX25_DEF_WINDOW, AX25_DEF_EWINDOW, AX25_DEF_T1, AX25_DEF_T2, AX25_DEF_T3,
        AX25_DEF_N2, AX25_DEF_IDLE, AX25_DEF_PACLEN, AX25_DEF_DS_TIMEOUT,
    ],
    Backoff: [AX25_BACKOFF_NONE, AX25_BACKOFF_LINEAR, AX25_BACKOFF_EXPONENTIAL],
    Digipeater: [AX25_DIGI_INBAND, AX25_DIGI_XBAND],
    Uid: [AX25_NOUID_DEFAULT, AX25_NOUID_BLOCK],
    Routing: [AX25_SET_RT_IPMODE],
    Ioctl: [
        SIOCAX25GETUID, SIOCAX25ADDUID, SIOCAX25DELUID, SIOCAX25NOUID, SIOCAX25OPTRT,
        SIOCAX25CTLCON, SIOCAX25GETINFOOLD, SIOCAX25ADDFWD, SIOCAX25DELFWD,
        SIOCAX25DEVCTL, SIOCAX25GETINFO,
    ],
    ProtocolId: [
        AX25_P_ROSE, AX25_P_VJCOMP, AX25_P_VJUNCOMP, AX25_P_SEGMENT, AX25_P_TEXNET,
        AX25_P_LQ, AX25_P_ATALK, AX25_P_ATALK_ARP, AX25_P_IP, AX25_P_ARP,
        AX25_P_FLEXNET, AX25_P_NETROM, AX25_P_TEXT,
    ],
};

/// Look up a constant by its exact name.
pub fn lookup(name: &str) -> Option<i64> {
    CONSTANTS.iter().find(|c| c.name == name).map(|c| c.value)
}

/// All constants of one group, in table order.
pub fn group(group: ConstantGroup) -> impl Iterator<Item = &'static Constant> {
    CONSTANTS.iter().filter(move |c| c.group == group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_values() {
        assert_eq!(lookup("AF_AX25"), Some(3));
        assert_eq!(lookup("SOL_AX25"), Some(257));
        assert_eq!(lookup("AX25_MAX_DIGIS"), Some(8));
        assert_eq!(lookup("SIOCAX25GETINFO"), Some(0x89ED));
        assert_eq!(lookup("AX25_P_TEXT"), Some(0xF0));
        assert_eq!(lookup("AX25_NOPE"), None);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = CONSTANTS.iter().map(|c| c.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn groups() {
        let opts: Vec<_> = group(ConstantGroup::SocketOption).map(|c| c.name).collect();
        assert_eq!(opts.len(), 12);
        assert_eq!(opts[0], "AX25_WINDOW");
        assert_eq!(group(ConstantGroup::Digipeater).count(), 2);
    }
}
