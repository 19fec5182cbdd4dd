//! Shared fixture: a small but complete data directory.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const USERS: &str = "\
Id,Country,UserName
1,India,a
2,United States of America,b
3,India,c
4,Japan,d
5,India,e
6,United States of America,f
7,Other,g
";

pub const MEDAL_EFFICIENCY: &str = "\
,Country,MedalEfficiency
0,Japan,50.0
1,France,80.0
2,India,12.5
3,United States of America,80.0
4,Other,3.0
";

pub const TOKEN_TRENDS: &str = "\
Country,Year,NotebookLength
India,2020,5.5
India,2019,5.0
Japan,2019,6.0
Japan,2020,6.5
";

pub const KEYWORDS: &str = "\
Country,xgboost,lstm,bert
India,3,1,0
India,2,0,4
Japan,1,1,1
United States of America,0,5,0
";

pub const TOOLS: &str = "\
Country,pandas,numpy
India,10,7
Japan,4,
";

pub fn write_data_dir(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("users_clean.csv"), USERS).unwrap();
    fs::write(dir.join("medal_efficiency.csv"), MEDAL_EFFICIENCY).unwrap();
    fs::write(dir.join("notebook_token_trends.csv"), TOKEN_TRENDS).unwrap();
    fs::write(dir.join("top_modeling_keywords.csv"), KEYWORDS).unwrap();
    fs::write(dir.join("popular_tools.csv"), TOOLS).unwrap();
}
