//! Wire types for `IGameServersService/GetServerList/v1`.
//!
//! Every field is optional on the wire; missing values fall back to
//! defaults so a sparse entry still yields a snapshot.

use serde::Deserialize;

use steamwatch_state::{ServerMetadata, Snapshot};

/// Top-level response envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetServerListResponse {
    pub response: ServerList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerList {
    pub servers: Vec<SteamServer>,
}

/// One server entry as reported by Steam.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SteamServer {
    pub addr: String,
    pub gameport: u16,
    pub steamid: String,
    pub name: String,
    pub appid: u32,
    pub gamedir: String,
    pub version: String,
    pub product: String,
    pub region: i32,
    pub players: u32,
    pub max_players: u32,
    pub bots: u32,
    pub map: String,
    pub secure: bool,
    pub dedicated: bool,
    pub os: String,
    /// Comma separated tag list.
    pub gametype: String,
}

impl GetServerListResponse {
    /// Snapshot of the first listed server, keyed by the queried address.
    pub fn into_snapshot(self, address: &str) -> Option<Snapshot> {
        self.response
            .servers
            .into_iter()
            .next()
            .map(|server| server.into_snapshot(address))
    }
}

impl SteamServer {
    pub fn into_snapshot(self, address: &str) -> Snapshot {
        let name = Some(self.name).filter(|n| !n.trim().is_empty());
        let tags = self
            .gametype
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Snapshot {
            address: address.to_string(),
            name,
            players: self.players,
            max_players: self.max_players,
            map: self.map,
            metadata: ServerMetadata {
                game_port: self.gameport,
                steam_id: self.steamid,
                app_id: self.appid,
                game_dir: self.gamedir,
                version: self.version,
                product: self.product,
                region: self.region,
                bots: self.bots,
                secure: self.secure,
                dedicated: self.dedicated,
                os: self.os,
                tags,
            },
        }
    }
}
