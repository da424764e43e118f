//! Refund bank codes
//!
//! Two-character codes Iamport expects in the `refund_bank` field of a
//! virtual-account cancellation.

use crate::error::IamportError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
    IndustrialBankOfKorea,
    Kookmin,
    KoreaExchange,
    Suhyup,
    NongHyup,
    Woori,
    StandardChartered,
    Daegu,
    Busan,
    Gwangju,
    Jeonbuk,
    Kyongnam,
    CitibankKorea,
    KoreaPost,
    Hana,
    Shinhan,
    TongyangSecurities,
    HyundaiSecurities,
    MiraeAssetSecurities,
    KoreaInvestmentSecurities,
    WooriInvestmentSecurities,
    HiInvestmentSecurities,
    HmcInvestmentSecurities,
    SkSecurities,
    DaishinSecurities,
    HanaDaetooSecurities,
    GoodMorningShinhanSecurities,
    DongbuSecurities,
    EugeneInvestmentSecurities,
    ShinyoungSecurities,
}

impl Bank {
    pub const ALL: [Bank; 30] = [
        Bank::IndustrialBankOfKorea,
        Bank::Kookmin,
        Bank::KoreaExchange,
        Bank::Suhyup,
        Bank::NongHyup,
        Bank::Woori,
        Bank::StandardChartered,
        Bank::Daegu,
        Bank::Busan,
        Bank::Gwangju,
        Bank::Jeonbuk,
        Bank::Kyongnam,
        Bank::CitibankKorea,
        Bank::KoreaPost,
        Bank::Hana,
        Bank::Shinhan,
        Bank::TongyangSecurities,
        Bank::HyundaiSecurities,
        Bank::MiraeAssetSecurities,
        Bank::KoreaInvestmentSecurities,
        Bank::WooriInvestmentSecurities,
        Bank::HiInvestmentSecurities,
        Bank::HmcInvestmentSecurities,
        Bank::SkSecurities,
        Bank::DaishinSecurities,
        Bank::HanaDaetooSecurities,
        Bank::GoodMorningShinhanSecurities,
        Bank::DongbuSecurities,
        Bank::EugeneInvestmentSecurities,
        Bank::ShinyoungSecurities,
    ];

    /// Wire code sent as `refund_bank`.
    pub fn code(&self) -> &'static str {
        match self {
            Bank::IndustrialBankOfKorea => "03",
            Bank::Kookmin => "04",
            Bank::KoreaExchange => "05",
            Bank::Suhyup => "07",
            Bank::NongHyup => "11",
            Bank::Woori => "20",
            Bank::StandardChartered => "23",
            Bank::Daegu => "31",
            Bank::Busan => "32",
            Bank::Gwangju => "34",
            Bank::Jeonbuk => "37",
            Bank::Kyongnam => "39",
            Bank::CitibankKorea => "53",
            Bank::KoreaPost => "71",
            Bank::Hana => "81",
            Bank::Shinhan => "88",
            Bank::TongyangSecurities => "D1",
            Bank::HyundaiSecurities => "D2",
            Bank::MiraeAssetSecurities => "D3",
            Bank::KoreaInvestmentSecurities => "D4",
            Bank::WooriInvestmentSecurities => "D5",
            Bank::HiInvestmentSecurities => "D6",
            Bank::HmcInvestmentSecurities => "D7",
            Bank::SkSecurities => "D8",
            Bank::DaishinSecurities => "D9",
            Bank::HanaDaetooSecurities => "DA",
            Bank::GoodMorningShinhanSecurities => "DB",
            Bank::DongbuSecurities => "DC",
            Bank::EugeneInvestmentSecurities => "DE",
            Bank::ShinyoungSecurities => "DF",
        }
    }

    /// Korean institution name as listed by the gateway.
    pub fn name(&self) -> &'static str {
        match self {
            Bank::IndustrialBankOfKorea => "기업은행",
            Bank::Kookmin => "국민은행",
            Bank::KoreaExchange => "외환은행",
            Bank::Suhyup => "수협중앙회",
            Bank::NongHyup => "농협중앙회",
            Bank::Woori => "우리은행",
            Bank::StandardChartered => "SC제일은행",
            Bank::Daegu => "대구은행",
            Bank::Busan => "부산은행",
            Bank::Gwangju => "광주은행",
            Bank::Jeonbuk => "전북은행",
            Bank::Kyongnam => "경남은행",
            Bank::CitibankKorea => "한국씨티은행",
            Bank::KoreaPost => "우체국",
            Bank::Hana => "하나은행",
            Bank::Shinhan => "통합신한은행",
            Bank::TongyangSecurities => "동양종합금융증권",
            Bank::HyundaiSecurities => "현대증권",
            Bank::MiraeAssetSecurities => "미래에셋증권",
            Bank::KoreaInvestmentSecurities => "한국투자증권",
            Bank::WooriInvestmentSecurities => "우리투자증권",
            Bank::HiInvestmentSecurities => "하이투자증권",
            Bank::HmcInvestmentSecurities => "HMC투자증권",
            Bank::SkSecurities => "SK증권",
            Bank::DaishinSecurities => "대신증권",
            Bank::HanaDaetooSecurities => "하나대투증권",
            Bank::GoodMorningShinhanSecurities => "굿모닝신한증권",
            Bank::DongbuSecurities => "동부증권",
            Bank::EugeneInvestmentSecurities => "유진투자증권",
            Bank::ShinyoungSecurities => "신영증권",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|bank| bank.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Bank {
    type Err = IamportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim())
            .ok_or_else(|| IamportError::config_error(format!("unknown bank code: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<&str> = Bank::ALL.iter().map(Bank::code).collect();
        assert_eq!(codes.len(), Bank::ALL.len());
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Bank::from_code("04"), Some(Bank::Kookmin));
        assert_eq!(Bank::from_code("da"), Some(Bank::HanaDaetooSecurities));
        assert_eq!(Bank::from_code("99"), None);
        assert_eq!("88".parse::<Bank>().unwrap(), Bank::Shinhan);
        assert!("XX".parse::<Bank>().is_err());
    }

    #[test]
    fn test_display_is_wire_code() {
        assert_eq!(Bank::KoreaPost.to_string(), "71");
        assert_eq!(Bank::KoreaPost.name(), "우체국");
    }
}
