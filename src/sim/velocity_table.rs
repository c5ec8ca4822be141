//! Jump velocity for each facing angle
//!
//! Generated offline, one entry per whole degree (0 is up, 90 is right):
//!
//! ```text
//! x = round(1536 * sin(a))
//! y = round(-1024 * cos(a))
//! ```
//!
//! Values are raw fixed-point sub-units per frame. Do not edit by hand.

use super::fixed::Fixed;

/// Number of entries, one per degree
pub const VELOCITY_TABLE_LEN: usize = 360;

/// `(vx, vy)` per degree
pub static VELOCITY_TABLE: [(i16, i16); VELOCITY_TABLE_LEN] = [
    (0, -1024), (27, -1024), (54, -1023), (80, -1023), (107, -1022), (134, -1020),
    (161, -1018), (187, -1016), (214, -1014), (240, -1011), (267, -1008), (293, -1005),
    (319, -1002), (346, -998), (372, -994), (398, -989), (423, -984), (449, -979),
    (475, -974), (500, -968), (525, -962), (550, -956), (575, -949), (600, -943),
    (625, -935), (649, -928), (673, -920), (697, -912), (721, -904), (745, -896),
    (768, -887), (791, -878), (814, -868), (837, -859), (859, -849), (881, -839),
    (903, -828), (924, -818), (946, -807), (967, -796), (987, -784), (1008, -773),
    (1028, -761), (1048, -749), (1067, -737), (1086, -724), (1105, -711), (1123, -698),
    (1141, -685), (1159, -672), (1177, -658), (1194, -644), (1210, -630), (1227, -616),
    (1243, -602), (1258, -587), (1273, -573), (1288, -558), (1303, -543), (1317, -527),
    (1330, -512), (1343, -496), (1356, -481), (1369, -465), (1381, -449), (1392, -433),
    (1403, -416), (1414, -400), (1424, -384), (1434, -367), (1443, -350), (1452, -333),
    (1461, -316), (1469, -299), (1476, -282), (1484, -265), (1490, -248), (1497, -230),
    (1502, -213), (1508, -195), (1513, -178), (1517, -160), (1521, -143), (1525, -125),
    (1528, -107), (1530, -89), (1532, -71), (1534, -54), (1535, -36), (1536, -18),
    (1536, 0), (1536, 18), (1535, 36), (1534, 54), (1532, 71), (1530, 89),
    (1528, 107), (1525, 125), (1521, 143), (1517, 160), (1513, 178), (1508, 195),
    (1502, 213), (1497, 230), (1490, 248), (1484, 265), (1476, 282), (1469, 299),
    (1461, 316), (1452, 333), (1443, 350), (1434, 367), (1424, 384), (1414, 400),
    (1403, 416), (1392, 433), (1381, 449), (1369, 465), (1356, 481), (1343, 496),
    (1330, 512), (1317, 527), (1303, 543), (1288, 558), (1273, 573), (1258, 587),
    (1243, 602), (1227, 616), (1210, 630), (1194, 644), (1177, 658), (1159, 672),
    (1141, 685), (1123, 698), (1105, 711), (1086, 724), (1067, 737), (1048, 749),
    (1028, 761), (1008, 773), (987, 784), (967, 796), (946, 807), (924, 818),
    (903, 828), (881, 839), (859, 849), (837, 859), (814, 868), (791, 878),
    (768, 887), (745, 896), (721, 904), (697, 912), (673, 920), (649, 928),
    (625, 935), (600, 943), (575, 949), (550, 956), (525, 962), (500, 968),
    (475, 974), (449, 979), (423, 984), (398, 989), (372, 994), (346, 998),
    (319, 1002), (293, 1005), (267, 1008), (240, 1011), (214, 1014), (187, 1016),
    (161, 1018), (134, 1020), (107, 1022), (80, 1023), (54, 1023), (27, 1024),
    (0, 1024), (-27, 1024), (-54, 1023), (-80, 1023), (-107, 1022), (-134, 1020),
    (-161, 1018), (-187, 1016), (-214, 1014), (-240, 1011), (-267, 1008), (-293, 1005),
    (-319, 1002), (-346, 998), (-372, 994), (-398, 989), (-423, 984), (-449, 979),
    (-475, 974), (-500, 968), (-525, 962), (-550, 956), (-575, 949), (-600, 943),
    (-625, 935), (-649, 928), (-673, 920), (-697, 912), (-721, 904), (-745, 896),
    (-768, 887), (-791, 878), (-814, 868), (-837, 859), (-859, 849), (-881, 839),
    (-903, 828), (-924, 818), (-946, 807), (-967, 796), (-987, 784), (-1008, 773),
    (-1028, 761), (-1048, 749), (-1067, 737), (-1086, 724), (-1105, 711), (-1123, 698),
    (-1141, 685), (-1159, 672), (-1177, 658), (-1194, 644), (-1210, 630), (-1227, 616),
    (-1243, 602), (-1258, 587), (-1273, 573), (-1288, 558), (-1303, 543), (-1317, 527),
    (-1330, 512), (-1343, 496), (-1356, 481), (-1369, 465), (-1381, 449), (-1392, 433),
    (-1403, 416), (-1414, 400), (-1424, 384), (-1434, 367), (-1443, 350), (-1452, 333),
    (-1461, 316), (-1469, 299), (-1476, 282), (-1484, 265), (-1490, 248), (-1497, 230),
    (-1502, 213), (-1508, 195), (-1513, 178), (-1517, 160), (-1521, 143), (-1525, 125),
    (-1528, 107), (-1530, 89), (-1532, 71), (-1534, 54), (-1535, 36), (-1536, 18),
    (-1536, 0), (-1536, -18), (-1535, -36), (-1534, -54), (-1532, -71), (-1530, -89),
    (-1528, -107), (-1525, -125), (-1521, -143), (-1517, -160), (-1513, -178), (-1508, -195),
    (-1502, -213), (-1497, -230), (-1490, -248), (-1484, -265), (-1476, -282), (-1469, -299),
    (-1461, -316), (-1452, -333), (-1443, -350), (-1434, -367), (-1424, -384), (-1414, -400),
    (-1403, -416), (-1392, -433), (-1381, -449), (-1369, -465), (-1356, -481), (-1343, -496),
    (-1330, -512), (-1317, -527), (-1303, -543), (-1288, -558), (-1273, -573), (-1258, -587),
    (-1243, -602), (-1227, -616), (-1210, -630), (-1194, -644), (-1177, -658), (-1159, -672),
    (-1141, -685), (-1123, -698), (-1105, -711), (-1086, -724), (-1067, -737), (-1048, -749),
    (-1028, -761), (-1008, -773), (-987, -784), (-967, -796), (-946, -807), (-924, -818),
    (-903, -828), (-881, -839), (-859, -849), (-837, -859), (-814, -868), (-791, -878),
    (-768, -887), (-745, -896), (-721, -904), (-697, -912), (-673, -920), (-649, -928),
    (-625, -935), (-600, -943), (-575, -949), (-550, -956), (-525, -962), (-500, -968),
    (-475, -974), (-449, -979), (-423, -984), (-398, -989), (-372, -994), (-346, -998),
    (-319, -1002), (-293, -1005), (-267, -1008), (-240, -1011), (-214, -1014), (-187, -1016),
    (-161, -1018), (-134, -1020), (-107, -1022), (-80, -1023), (-54, -1023), (-27, -1024),
];

/// Look up the jump velocity for a facing angle in whole degrees
#[inline]
pub fn jump_velocity(angle: u16) -> (Fixed, Fixed) {
    debug_assert!((angle as usize) < VELOCITY_TABLE_LEN, "angle {angle} out of range");
    let (x, y) = VELOCITY_TABLE[angle as usize];
    (Fixed::from_raw(x as i32), Fixed::from_raw(y as i32))
}
