use dioxus::prelude::*;

const METAMASK_DOWNLOAD_URL: &str = "https://metamask.io/download.html";

/// Static "About" and "How to Use" sections.
#[component]
pub fn About(wallet_name: String, fixed_amount: String) -> Element {
    rsx! {
        section { class: "info",
            h2 { "About This Portal" }
            p {
                "This decentralized portal allows you to deposit, withdraw, and transfer ETH using your {wallet_name} wallet."
            }
            p {
                "Connect your {wallet_name} wallet to get started and manage your funds securely on the Ethereum blockchain."
            }
        }
        section { class: "instructions",
            h2 { "How to Use" }
            ol {
                li {
                    "Install {wallet_name} from "
                    a {
                        href: METAMASK_DOWNLOAD_URL,
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "here"
                    }
                    "."
                }
                li { "Connect your {wallet_name} wallet by clicking the button above." }
                li { "Use the deposit button to add {fixed_amount} ETH to your balance." }
                li { "Use the withdraw button to remove {fixed_amount} ETH from your balance." }
                li { "Transfer ETH to another account by clicking on the transfer button." }
            }
        }
    }
}
