//! Fixtures shared by detector tests

/// Gettysburg Address, letters only (1149 letters)
pub const GETTYSBURG: &str = "FOURSCOREANDSEVENYEARSAGOOURFATHERSBROUGHTFORTHONTHISCONTINENTANEWNATIONCONCEIVEDINLIBERTY\
    ANDDEDICATEDTOTHEPROPOSITIONTHATALLMENARECREATEDEQUALNOWWEAREENGAGEDINAGREATCIVILWARTESTIN\
    GWHETHERTHATNATIONORANYNATIONSOCONCEIVEDANDSODEDICATEDCANLONGENDUREWEAREMETONAGREATBATTLEF\
    IELDOFTHATWARWEHAVECOMETODEDICATEAPORTIONOFTHATFIELDASAFINALRESTINGPLACEFORTHOSEWHOHEREGAV\
    ETHEIRLIVESTHATTHATNATIONMIGHTLIVEITISALTOGETHERFITTINGANDPROPERTHATWESHOULDDOTHISBUTINALA\
    RGERSENSEWECANNOTDEDICATEWECANNOTCONSECRATEWECANNOTHALLOWTHISGROUNDTHEBRAVEMENLIVINGANDDEA\
    DWHOSTRUGGLEDHEREHAVECONSECRATEDITFARABOVEOURPOORPOWERTOADDORDETRACTTHEWORLDWILLLITTLENOTE\
    NORLONGREMEMBERWHATWESAYHEREBUTITCANNEVERFORGETWHATTHEYDIDHEREITISFORUSTHELIVINGRATHERTOBE\
    DEDICATEDHERETOTHEUNFINISHEDWORKWHICHTHEYWHOFOUGHTHEREHAVETHUSFARSONOBLYADVANCEDITISRATHER\
    FORUSTOBEHEREDEDICATEDTOTHEGREATTASKREMAININGBEFOREUSTHATFROMTHESEHONOREDDEADWETAKEINCREAS\
    EDDEVOTIONTOTHATCAUSEFORWHICHTHEYGAVETHELASTFULLMEASUREOFDEVOTIONTHATWEHEREHIGHLYRESOLVETH\
    ATTHESEDEADSHALLNOTHAVEDIEDINVAINTHATTHISNATIONUNDERGODSHALLHAVEANEWBIRTHOFFREEDOMANDTHATG\
    OVERNMENTOFTHEPEOPLEBYTHEPEOPLEFORTHEPEOPLESHALLNOTPERISHFROMTHEEARTH";

pub fn caesar_encrypt(plain: &[u8], shift: u8) -> Vec<u8> {
    plain
        .iter()
        .map(|&p| b'A' + ((p - b'A') + shift) % 26)
        .collect()
}

pub fn affine_encrypt(plain: &[u8], a: u8, b: u8) -> Vec<u8> {
    plain
        .iter()
        .map(|&p| b'A' + ((a as u32 * (p - b'A') as u32 + b as u32) % 26) as u8)
        .collect()
}

pub fn vigenere_encrypt(plain: &[u8], key: &[u8]) -> Vec<u8> {
    plain
        .iter()
        .enumerate()
        .map(|(i, &p)| b'A' + ((p - b'A') + (key[i % key.len()] - b'A')) % 26)
        .collect()
}

/// Plaintext letter i becomes `key[i]`
pub fn substitution_encrypt(plain: &[u8], key: &[u8; 26]) -> Vec<u8> {
    plain.iter().map(|&p| key[(p - b'A') as usize]).collect()
}

/// Write row-wise under the key, read columns in alphabetical key order
pub fn columnar_encrypt(plain: &[u8], key: &[u8]) -> Vec<u8> {
    let k = key.len();
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by_key(|&i| (key[i], i));
    order
        .into_iter()
        .flat_map(|col| plain.iter().skip(col).step_by(k).copied())
        .collect()
}
