/// Static brand dimension. Codes match the warehouse `BRD_CD` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brand {
    pub code: &'static str,
    pub name: &'static str,
}

pub const BRANDS: &[Brand] = &[
    Brand { code: "M", name: "MLB" },
    Brand { code: "I", name: "MLB KIDS" },
    Brand { code: "X", name: "DISCOVERY" },
    Brand { code: "V", name: "DUVETICA" },
    Brand { code: "ST", name: "SERGIO" },
    Brand { code: "W", name: "SUPRA" },
];

pub fn find_brand(code: &str) -> Option<&'static Brand> {
    BRANDS.iter().find(|brand| brand.code == code)
}

/// Brand `M` shops reported under the RF channel regardless of their
/// warehouse distribution type.
pub const RF_OVERRIDE_SHOPS: &[&str] = &["649", "155", "524", "526", "82", "744", "6048", "954"];

/// SQL literal list for the RF override shops: `'649','155',...`
pub fn rf_override_shop_list() -> String {
    RF_OVERRIDE_SHOPS
        .iter()
        .map(|shop_id| format!("'{shop_id}'"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Display name for a warehouse distribution-type (sales channel) code.
pub fn channel_display_name(code: &str) -> &'static str {
    match code {
        "01" => "백화점",
        "02" => "면세점",
        "03" => "직영가두",
        "04" => "자사몰",
        "05" => "제휴몰",
        "06" => "대리점",
        "07" => "아울렛",
        "08" => "사입",
        "11" => "직영몰",
        "12" => "직영2",
        "RF" => "RF",
        _ => "기타",
    }
}
