use gen_copier_macros::{Tagged, copier};

copier! {
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Person {
        #[tag = r#"gen-copier:"identifier""#]
        pub id: u32,
        pub name: String,
        pub nickname: Option<String>,
        pub age: u8,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct PersonDto {
        pub identifier: u32,
        pub name: String,
        pub nickname: Option<String>,
        pub age: u16,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub sku: String,
    pub quantity: u32,
}

copier! {
    #![copier(method = "fill")]

    #[derive(Debug, Default)]
    pub struct Order {
        pub lines: Vec<Line>,
        #[tag = r#"json:"ref" gen-copier:"reference""#]
        pub id: u64,
    }

    #[derive(Debug, Default)]
    pub struct OrderRecord {
        pub lines: Vec<Line>,
        pub reference: u64,
        pub id: u64,
    }
}

copier! {
    pub struct Point(pub i32, pub i32);

    #[derive(Debug, Default)]
    pub struct Coordinates {
        pub x: i32,
        pub y: i32,
    }
}

#[derive(Debug, Default, Tagged)]
pub struct TaggedRow {
    #[tag = r#"gen-copier:"key" json:"id""#]
    pub id: u64,
    pub value: String,
}
