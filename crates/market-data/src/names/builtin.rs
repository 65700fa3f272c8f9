//! Built-in display names for the default watch sets.

pub(super) const A_SHARE_NAMES: &[(&str, &str)] = &[
    ("600519", "贵州茅台"),
    ("601318", "中国平安"),
    ("600036", "招商银行"),
    ("601166", "兴业银行"),
    ("600276", "恒瑞医药"),
    ("000858", "五粮液"),
    ("000001", "平安银行"),
    ("000002", "万科A"),
    ("000333", "美的集团"),
    ("000651", "格力电器"),
    ("000876", "新希望"),
    ("002008", "大族激光"),
    ("002230", "科大讯飞"),
    ("002415", "海康威视"),
    ("002460", "赣锋锂业"),
    ("002594", "比亚迪"),
    ("300059", "东方财富"),
    ("300751", "迈瑞医疗"),
    ("600000", "浦发银行"),
    ("600016", "民生银行"),
    ("600028", "中国石化"),
    ("600030", "中信证券"),
    ("600050", "中国联通"),
    ("600104", "上海汽车"),
    ("600196", "复星医药"),
    ("600271", "航天信息"),
    ("600309", "万华化学"),
    ("600438", "通威股份"),
    ("600585", "海螺水泥"),
    ("600690", "青岛海尔"),
];

// FFIE was renamed FFAI in 2025; both tickers resolve.
pub(super) const US_NAMES: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("BRK B", "Berkshire Hathaway Inc. Class B"),
    ("FFAI", "Faraday Future Intelligent Electric Inc."),
    ("FFIE", "Faraday Future Intelligent Electric Inc."),
    ("GME", "GameStop Corp."),
    ("NIO", "NIO Inc."),
    ("TSLA", "Tesla, Inc."),
];
