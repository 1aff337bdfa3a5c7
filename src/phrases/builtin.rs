//! Built-in English + Arabic phrase tables (dictionary version 1).

pub(crate) const VERSION: u32 = 1;

/// Any single hit marks the utterance as high risk.
pub(crate) const HIGH: &[&str] = &[
    // English
    "send money",
    "wire transfer",
    "transfer the money",
    "gift card",
    "bank account number",
    "routing number",
    "social security number",
    "credit card number",
    "card number",
    "your pin",
    "one-time password",
    "otp code",
    "verification code",
    "your password",
    "western union",
    "moneygram",
    "bitcoin",
    "crypto wallet",
    "arrest warrant",
    "you will be arrested",
    "pay the fine",
    "anydesk",
    "teamviewer",
    "remote access",
    // Arabic
    "أرسل المال",
    "حول المبلغ",
    "تحويل الأموال",
    "حوالة بنكية",
    "رقم البطاقة",
    "رقم الحساب",
    "الرقم السري",
    "رمز التحقق",
    "كلمة المرور",
    "بطاقة هدايا",
    "سيتم القبض عليك",
    "بيتكوين",
];

/// Needs corroboration: two hits, or one hit plus a low-tier hit.
pub(crate) const MEDIUM: &[&str] = &[
    // English
    "click this link",
    "click the link",
    "confirm your identity",
    "verify your account",
    "account suspended",
    "account has been suspended",
    "unusual activity",
    "suspicious login",
    "security alert",
    "act now",
    "limited time",
    "urgent",
    "you have won",
    "you've won",
    "claim your prize",
    "tax refund",
    "final notice",
    "do not tell anyone",
    "keep this confidential",
    "update your payment",
    // Arabic
    "اضغط على الرابط",
    "تأكيد هويتك",
    "تم تعليق حسابك",
    "نشاط مشبوه",
    "عاجل",
    "فزت بجائزة",
    "لا تخبر أحدا",
    "حدث بياناتك",
    "إنذار نهائي",
];

/// Weak signals. Only count toward a verdict in combination. No entry may
/// occur inside a medium phrase, or that phrase would corroborate itself.
pub(crate) const LOW: &[&str] = &[
    // English
    "call back",
    "call me back",
    "dear customer",
    "customer support",
    "special offer",
    "offer",
    "free",
    "discount",
    "congratulations",
    "lottery",
    "investment",
    "insurance",
    "delivery",
    "package",
    // Arabic
    "اتصل بنا",
    "عزيزي العميل",
    "خدمة العملاء",
    "عرض خاص",
    "مجانا",
    "مبروك",
    "استثمار",
    "شحنة",
];
