use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub text: &'static str,
    pub href: &'static str,
    pub external: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialTarget {
    Url(&'static str),
    /// Base64 of the address, decoded only when activated.
    ObfuscatedEmail(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub title: &'static str,
    pub icon: &'static str,
    pub target: SocialTarget,
}

pub const HOME_URL: &str = "https://magichear.github.io/";

pub const NAVIGATION_LINKS: &[NavLink] = &[
    NavLink { text: "首页", href: HOME_URL, external: false },
    NavLink { text: "油猴", href: "https://greasyfork.org/zh-CN", external: true },
    NavLink { text: "简历", href: "https://magichear.github.io/intruduction/", external: true },
    NavLink { text: "学习", href: "https://magichear.github.io/study/", external: true },
    NavLink { text: "四十三", href: "https://magichear.github.io/43/", external: true },
    NavLink { text: "趣玩", href: "https://magichear.github.io/interesting/", external: true },
    NavLink { text: "关于", href: "https://magichear.github.io/magichear/", external: true },
    NavLink { text: "bilibili", href: "https://www.bilibili.com/", external: true },
    NavLink { text: "vlab", href: "https://vlab.ustc.edu.cn/", external: true },
    NavLink { text: "jwc", href: "https://www.teach.ustc.edu.cn/", external: true },
    NavLink { text: "LARS", href: "https://jyjsxx.github.io/", external: true },
    NavLink { text: "Mail", href: "https://mail.ustc.edu.cn", external: true },
    NavLink { text: "力扣", href: "https://leetcode.com/", external: true },
    NavLink { text: "环高分布", href: "https://1zio1.github.io/", external: true },
];

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        title: "github",
        icon: "gh",
        target: SocialTarget::Url("https://github.com/magichear/magichear"),
    },
    SocialLink {
        title: "weibo",
        icon: "微",
        target: SocialTarget::Url("https://www.weibo.com/u/6343741774"),
    },
    SocialLink {
        title: "zhihu",
        icon: "知",
        target: SocialTarget::Url("https://www.zhihu.com/people/bai-wu-liao-lai-41-82"),
    },
    SocialLink {
        title: "email",
        icon: "@",
        target: SocialTarget::ObfuscatedEmail("d2dkZWNhZGU0M0BtYWlsLnVzdGMuZWR1LmNu"),
    },
];

/// Flat view over both link groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEntry {
    Nav(&'static NavLink),
    Social(&'static SocialLink),
}

impl LinkEntry {
    pub fn label(self) -> &'static str {
        match self {
            Self::Nav(link) => link.text,
            Self::Social(link) => link.title,
        }
    }

    /// The URL to navigate to; e-mail links decode to `mailto:`.
    pub fn resolve(self) -> AppResult<String> {
        match self {
            Self::Nav(link) => Ok(link.href.to_string()),
            Self::Social(link) => match link.target {
                SocialTarget::Url(url) => Ok(url.to_string()),
                SocialTarget::ObfuscatedEmail(encoded) => decode_email(encoded),
            },
        }
    }
}

pub fn all_links() -> Vec<LinkEntry> {
    NAVIGATION_LINKS
        .iter()
        .map(LinkEntry::Nav)
        .chain(SOCIAL_LINKS.iter().map(LinkEntry::Social))
        .collect()
}

pub fn decode_email(encoded: &str) -> AppResult<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|err| AppError::invalid_argument(format!("e-mail link is not base64: {err}")))?;
    let address = String::from_utf8(bytes)
        .map_err(|_| AppError::invalid_argument("e-mail link is not UTF-8"))?;
    if !address.contains('@') {
        return Err(AppError::invalid_argument("e-mail link has no address"));
    }
    Ok(format!("mailto:{address}"))
}
