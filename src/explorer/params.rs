//! Enumerated explorer query parameters.

use std::fmt;

use crate::http::QueryValue;

macro_rules! query_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $value:literal),+ $(,)? }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = concat!("`", $value, "`")]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for QueryValue {
            fn from(value: $name) -> Self {
                QueryValue::One(value.as_str().to_string())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }
    };
}

query_enum! {
    /// Block tag for balance queries.
    Tag { Earliest => "earliest", Pending => "pending", Latest => "latest" } default Latest
}

query_enum! {
    /// Result ordering.
    Sort { Asc => "asc", Desc => "desc" } default Asc
}

query_enum! {
    /// Canonical or uncle blocks.
    BlockType { Blocks => "blocks", Uncles => "uncles" } default Blocks
}

query_enum! {
    /// Which block to pick around a timestamp.
    Closest { Before => "before", After => "after" } default Before
}

query_enum! {
    /// Node client for chain size statistics.
    ClientType { Geth => "geth", Parity => "parity" } default Geth
}

query_enum! {
    /// Node sync mode for chain size statistics.
    SyncMode { Default => "default", Archive => "archive" } default Default
}

query_enum! {
    /// Operator joining two log topics.
    TopicOperator { And => "and", Or => "or" } default And
}

query_enum! {
    /// Daily statistics series sharing the `startdate`, `enddate` and `sort` parameters.
    DailyStat {
        TxnFee => "dailytxnfee",
        NewAddress => "dailynewaddress",
        NetUtilization => "dailynetutilization",
        AvgHashRate => "dailyavghashrate",
        Tx => "dailytx",
        AvgNetDifficulty => "dailyavgnetdifficulty",
        MarketCap => "ethdailymarketcap",
        Price => "ethdailyprice",
        AvgBlockSize => "dailyavgblocksize",
        BlockCount => "dailyblkcount",
        BlockRewards => "dailyblockrewards",
        AvgBlockTime => "dailyavgblocktime",
        UncleBlockCount => "dailyuncleblkcount",
        AvgGasLimit => "dailyavggaslimit",
        GasUsed => "dailygasused",
        AvgGasPrice => "dailyavggasprice",
    } default Tx
}
