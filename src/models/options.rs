//! 数据集选项表
//!
//! 表单下拉框的显示名与系统 valid value 代码之间的映射

use serde::{Deserialize, Serialize};

macro_rules! option_table {
    (
        $(#[$meta:meta])*
        $name:ident, $map:ident {
            $($variant:ident = $code:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        static $map: phf::Map<&'static str, $name> = phf::phf_map! {
            $($label => $name::$variant),+
        };

        impl $name {
            /// 系统中的 valid value 代码
            pub fn code(self) -> u32 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn from_code(code: u32) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// 下拉框中显示的文本
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                $map.get(label.trim()).copied()
            }

            pub fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }
        }
    };
}

option_table! {
    /// 是/否
    YesNo, YES_NO {
        Yes = 17058 => "Yes",
        No = 17059 => "No",
    }
}

option_table! {
    /// 地址类型
    AddressType, ADDRESS_TYPES {
        Permanent = 13042 => "Permanent",
        Temporary = 13043 => "Temporary",
    }
}

option_table! {
    /// 肠道准备药物
    DrugType, DRUG_TYPES {
        Bisacodyl = 200251 => "Bisacodyl",
        Citramag = 200252 => "Citramag",
        Mannitol = 200253 => "Mannitol",
        Picolax = 200254 => "Picolax",
        Senna = 200255 => "Senna",
        SodiumPhosphate = 200256 => "Sodium Phosphate",
        MoviPrep = 200257 => "Moviprep",
        KleanPrep = 200258 => "Klean Prep",
        Plenvu = 203067 => "Plenvu",
        Other = 203068 => "Other",
    }
}

option_table! {
    /// 内镜检查到达位置
    EndoscopyLocation, ENDOSCOPY_LOCATIONS {
        Anus = 17231 => "Anus",
        Rectum = 17232 => "Rectum",
        SigmoidColon = 17233 => "Sigmoid colon",
        DescendingColon = 17234 => "Descending colon",
        SplenicFlexure = 17235 => "Splenic flexure",
        TransverseColon = 17236 => "Transverse colon",
        HepaticFlexure = 17237 => "Hepatic flexure",
        AscendingColon = 17238 => "Ascending colon",
        Caecum = 17239 => "Caecum",
        Ileum = 17240 => "Ileum",
        Anastomosis = 17241 => "Anastomosis",
        Appendix = 17242 => "Appendix",
    }
}

option_table! {
    /// 息肉巴黎分型
    PolypClassification, POLYP_CLASSIFICATIONS {
        Ip = 305594 => "Ip",
        Isp = 305595 => "Isp",
        Is = 305596 => "Is",
        IIa = 305597 => "IIa",
        IIb = 305598 => "IIb",
        IIc = 305599 => "IIc",
        LstG = 305600 => "LST-G",
        LstNg = 305601 => "LST-NG",
    }
}

/// 场景文件中按名称引用的选项表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionTable {
    YesNo,
    AddressType,
    DrugType,
    EndoscopyLocation,
    PolypClassification,
}

impl OptionTable {
    /// 把显示名翻译为 valid value 代码
    pub fn resolve(self, label: &str) -> Option<u32> {
        match self {
            OptionTable::YesNo => YesNo::from_label(label).map(YesNo::code),
            OptionTable::AddressType => AddressType::from_label(label).map(AddressType::code),
            OptionTable::DrugType => DrugType::from_label(label).map(DrugType::code),
            OptionTable::EndoscopyLocation => {
                EndoscopyLocation::from_label(label).map(EndoscopyLocation::code)
            }
            OptionTable::PolypClassification => {
                PolypClassification::from_label(label).map(PolypClassification::code)
            }
        }
    }
}
