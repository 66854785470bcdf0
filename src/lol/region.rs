/// Riot platform (shard) a summoner lives on, e.g. `tr1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Br1,
    Eun1,
    Euw1,
    Jp1,
    Kr,
    La1,
    La2,
    Me1,
    Na1,
    Oc1,
    Ph2,
    Ru,
    Sg2,
    Th2,
    Tr1,
    Tw2,
    Vn2,
}

/// Regional routing cluster used by account-v1 and match-v5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingRegion {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Platform {
    pub fn parse(value: &str) -> Option<Self> {
        let platform = match value.trim().to_ascii_lowercase().as_str() {
            "br1" => Platform::Br1,
            "eun1" => Platform::Eun1,
            "euw1" => Platform::Euw1,
            "jp1" => Platform::Jp1,
            "kr" => Platform::Kr,
            "la1" => Platform::La1,
            "la2" => Platform::La2,
            "me1" => Platform::Me1,
            "na1" => Platform::Na1,
            "oc1" => Platform::Oc1,
            "ph2" => Platform::Ph2,
            "ru" => Platform::Ru,
            "sg2" => Platform::Sg2,
            "th2" => Platform::Th2,
            "tr1" => Platform::Tr1,
            "tw2" => Platform::Tw2,
            "vn2" => Platform::Vn2,
            _ => return None,
        };
        Some(platform)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Br1 => "br1",
            Platform::Eun1 => "eun1",
            Platform::Euw1 => "euw1",
            Platform::Jp1 => "jp1",
            Platform::Kr => "kr",
            Platform::La1 => "la1",
            Platform::La2 => "la2",
            Platform::Me1 => "me1",
            Platform::Na1 => "na1",
            Platform::Oc1 => "oc1",
            Platform::Ph2 => "ph2",
            Platform::Ru => "ru",
            Platform::Sg2 => "sg2",
            Platform::Th2 => "th2",
            Platform::Tr1 => "tr1",
            Platform::Tw2 => "tw2",
            Platform::Vn2 => "vn2",
        }
    }

    /// Cluster serving match history for this platform.
    pub fn match_region(&self) -> RoutingRegion {
        match self {
            Platform::Br1 | Platform::La1 | Platform::La2 | Platform::Na1 => RoutingRegion::Americas,
            Platform::Eun1 | Platform::Euw1 | Platform::Me1 | Platform::Ru | Platform::Tr1 => {
                RoutingRegion::Europe
            }
            Platform::Jp1 | Platform::Kr => RoutingRegion::Asia,
            Platform::Oc1
            | Platform::Ph2
            | Platform::Sg2
            | Platform::Th2
            | Platform::Tw2
            | Platform::Vn2 => RoutingRegion::Sea,
        }
    }

    /// Cluster serving account lookups. account-v1 has no SEA cluster.
    pub fn account_region(&self) -> RoutingRegion {
        match self.match_region() {
            RoutingRegion::Sea => RoutingRegion::Asia,
            other => other,
        }
    }
}

impl RoutingRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingRegion::Americas => "americas",
            RoutingRegion::Asia => "asia",
            RoutingRegion::Europe => "europe",
            RoutingRegion::Sea => "sea",
        }
    }
}
